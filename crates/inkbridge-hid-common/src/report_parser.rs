//! HID report reading and building
//!
//! Tablet firmware publishes its input report as fixed little-endian fields
//! at known offsets. [`ReportParser`] reads a field at an offset and
//! [`ReportBuilder`] writes one; every read is bounds-checked.

use crate::{HidCommonError, HidCommonResult};

/// Read-only view over one input report.
#[derive(Debug, Clone, Copy)]
pub struct ReportParser<'a> {
    buffer: &'a [u8],
}

impl<'a> ReportParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { buffer: data }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    fn bytes_at<const N: usize>(&self, offset: usize) -> HidCommonResult<[u8; N]> {
        let out_of_bounds = HidCommonError::OutOfBounds {
            offset,
            width: N,
            len: self.buffer.len(),
        };
        let Some(end) = offset.checked_add(N) else {
            return Err(out_of_bounds);
        };
        self.buffer
            .get(offset..end)
            .and_then(|s| <[u8; N]>::try_from(s).ok())
            .ok_or(out_of_bounds)
    }

    pub fn u8_at(&self, offset: usize) -> HidCommonResult<u8> {
        Ok(u8::from_le_bytes(self.bytes_at::<1>(offset)?))
    }

    pub fn u16_le_at(&self, offset: usize) -> HidCommonResult<u16> {
        Ok(u16::from_le_bytes(self.bytes_at::<2>(offset)?))
    }

    pub fn i16_le_at(&self, offset: usize) -> HidCommonResult<i16> {
        Ok(i16::from_le_bytes(self.bytes_at::<2>(offset)?))
    }
}

/// Writes fields into a fixed-layout report. Used to synthesize tablet
/// input for tests and fixtures.
#[derive(Debug, Clone, Default)]
pub struct ReportBuilder {
    buffer: Vec<u8>,
}

impl ReportBuilder {
    /// Zero-filled report of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            buffer: vec![0u8; len],
        }
    }

    pub fn put_u8_at(&mut self, offset: usize, value: u8) -> &mut Self {
        self.put_bytes_at(offset, &[value])
    }

    pub fn put_u16_le_at(&mut self, offset: usize, value: u16) -> &mut Self {
        self.put_bytes_at(offset, &value.to_le_bytes())
    }

    pub fn put_i16_le_at(&mut self, offset: usize, value: i16) -> &mut Self {
        self.put_bytes_at(offset, &value.to_le_bytes())
    }

    /// Writes `data` at `offset`, growing the report when needed.
    pub fn put_bytes_at(&mut self, offset: usize, data: &[u8]) -> &mut Self {
        let end = offset.saturating_add(data.len());
        if self.buffer.len() < end {
            self.buffer.resize(end, 0);
        }
        if let Some(dst) = self.buffer.get_mut(offset..end) {
            dst.copy_from_slice(data);
        }
        self
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

/// Parses a whitespace- or colon-separated hex dump (`"00 01 ff"`,
/// `"00:01:ff"` or `"0001ff"`) into report bytes.
pub fn parse_hex_report(text: &str) -> HidCommonResult<Vec<u8>> {
    let digits: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != ',')
        .collect();
    let digits = digits.strip_prefix("0x").unwrap_or(&digits);
    if !digits.len().is_multiple_of(2) {
        return Err(HidCommonError::InvalidReport(format!(
            "odd number of hex digits ({})",
            digits.len()
        )));
    }
    let bytes = digits.as_bytes();
    bytes
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| {
                    HidCommonError::InvalidReport(format!(
                        "invalid hex byte '{}'",
                        String::from_utf8_lossy(pair)
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_at_offsets() -> HidCommonResult<()> {
        let data = [0x07, 0x00, 0x34, 0x12, 0xFF, 0xFF];
        let parser = ReportParser::new(&data);

        assert_eq!(parser.u8_at(0)?, 0x07);
        assert_eq!(parser.u16_le_at(2)?, 0x1234);
        assert_eq!(parser.i16_le_at(4)?, -1);
        Ok(())
    }

    #[test]
    fn test_reads_past_end_fail() {
        let data = [0x00, 0x01, 0x02];
        let parser = ReportParser::new(&data);

        assert!(parser.u16_le_at(2).is_err());
        assert!(parser.u8_at(3).is_err());
        assert!(parser.u8_at(usize::MAX).is_err());
        assert!(ReportParser::new(&[]).is_empty());
    }

    #[test]
    fn test_report_builder_put_grows() {
        let mut builder = ReportBuilder::zeroed(4);
        builder.put_u16_le_at(2, 0xBEEF).put_u8_at(6, 0x20);

        assert_eq!(
            builder.into_inner(),
            vec![0x00, 0x00, 0xEF, 0xBE, 0x00, 0x00, 0x20]
        );
    }

    #[test]
    fn test_parse_hex_report_formats() -> HidCommonResult<()> {
        let expected = vec![0x00, 0x01, 0xFF];
        assert_eq!(parse_hex_report("00 01 ff")?, expected);
        assert_eq!(parse_hex_report("00:01:FF")?, expected);
        assert_eq!(parse_hex_report("0x0001ff")?, expected);
        assert!(parse_hex_report("abc").is_err());
        assert!(parse_hex_report("zz").is_err());
        Ok(())
    }
}
