//! Sample normalization and raw report decode errors.
//!
//! None of these abort a stroke. The renderer logs them and drops the
//! offending sample; stroke state is left untouched.

use crate::common::ErrorSeverity;

/// Errors raised while turning a raw input event into a normalized sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    /// The event kind is not one the normalizer understands
    #[error("unhandled event: {0}")]
    UnrecognizedEvent(String),

    /// The event is understood but carries no stroke phase (hover enter/leave)
    #[error("event '{0}' does not affect stroke state")]
    NotAStrokeEvent(String),

    /// The device kind tag is not one the normalizer understands
    #[error("unknown pointer type: {0}")]
    UnknownSource(String),

    /// Raw HID payload could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl SampleError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SampleError::UnrecognizedEvent(_) => ErrorSeverity::Warning,
            SampleError::NotAStrokeEvent(_) => ErrorSeverity::Info,
            SampleError::UnknownSource(_) => ErrorSeverity::Warning,
            SampleError::Decode(e) => e.severity(),
        }
    }

    /// Create an unrecognized-event error.
    pub fn unrecognized(kind: impl Into<String>) -> Self {
        SampleError::UnrecognizedEvent(kind.into())
    }

    /// True when the sample should be dropped without a warning.
    pub fn is_benign(&self) -> bool {
        matches!(self, SampleError::NotAStrokeEvent(_))
    }
}

/// Raw HID report decode failures. Decoding fails closed: a short or
/// malformed payload never yields a partial sample.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Payload shorter than the fixed layout requires
    #[error("report too short: expected at least {expected} bytes, got {actual}")]
    ReportTooShort {
        /// Minimum length required by the layout
        expected: usize,
        /// Length actually received
        actual: usize,
    },

    /// A field read fell outside the payload
    #[error("field '{field}' at offset {offset} is out of range for a {len}-byte report")]
    FieldOutOfRange {
        /// Field name
        field: &'static str,
        /// Byte offset of the field
        offset: usize,
        /// Report length
        len: usize,
    },

    /// The report id byte does not match the profile
    #[error("unexpected report id {actual:#04x}, expected {expected:#04x}")]
    UnexpectedReportId {
        /// Report id required by the profile
        expected: u8,
        /// Report id received
        actual: u8,
    },
}

impl DecodeError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DecodeError::ReportTooShort { .. } => ErrorSeverity::Warning,
            DecodeError::FieldOutOfRange { .. } => ErrorSeverity::Warning,
            DecodeError::UnexpectedReportId { .. } => ErrorSeverity::Info,
        }
    }

    /// Create a report-too-short error.
    pub fn too_short(expected: usize, actual: usize) -> Self {
        DecodeError::ReportTooShort { expected, actual }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_event_message() {
        let err = SampleError::unrecognized("gotpointercapture");
        assert_eq!(err.to_string(), "unhandled event: gotpointercapture");
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_hover_events_are_benign() {
        assert!(SampleError::NotAStrokeEvent("pointerenter".into()).is_benign());
        assert!(!SampleError::unrecognized("wheel").is_benign());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::too_short(15, 3);
        let msg = err.to_string();
        assert!(msg.contains("15"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_decode_wraps_transparently() {
        let err: SampleError = DecodeError::too_short(15, 0).into();
        assert_eq!(
            err.to_string(),
            "report too short: expected at least 15 bytes, got 0"
        );
    }

    #[test]
    fn test_report_id_display_is_hex() {
        let err = DecodeError::UnexpectedReportId {
            expected: 0x02,
            actual: 0x10,
        };
        assert!(err.to_string().contains("0x10"));
        assert!(err.to_string().contains("0x02"));
    }
}
