//! Common HID utilities for pen tablet input reports
//!
//! The sample normalizer never talks to hardware. It consumes input reports
//! that the device-acquisition layer has already opened; this crate holds the
//! pieces both sides agree on: a bounds-checked little-endian reader, a
//! builder for synthesizing reports, device identity, and the
//! [`InputReportStream`] seam.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod report_parser;
pub mod stream;

pub use device_info::*;
pub use report_parser::*;
pub use stream::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Invalid report format: {0}")]
    InvalidReport(String),

    #[error("Read of {width} bytes at offset {offset} exceeds {len}-byte report")]
    OutOfBounds {
        offset: usize,
        width: usize,
        len: usize,
    },

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_types() {
        let err = HidCommonError::OutOfBounds {
            offset: 14,
            width: 1,
            len: 10,
        };
        assert_eq!(
            format!("{}", err),
            "Read of 1 bytes at offset 14 exceeds 10-byte report"
        );

        let err = HidCommonError::Disconnected;
        assert_eq!(format!("{}", err), "Device disconnected");
    }
}
