//! Convenience re-exports for common test utilities.

pub use crate::fixtures::{StrokeScript, pen_stroke, tablet_report, touch_stroke};
pub use crate::must::{assert_close, must, must_err, must_some};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
