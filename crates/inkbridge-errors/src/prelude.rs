//! Prelude module for convenient error handling imports.

pub use crate::{
    Result,
    common::{ErrorCategory, ErrorContext, ErrorSeverity, InkBridgeError, ResultExt},
    config::ConfigError,
    sample::{DecodeError, SampleError},
    telemetry::TelemetryError,
};

/// Macro for creating an error context with key-value pairs.
///
/// # Example
///
/// ```
/// use inkbridge_errors::error_context;
///
/// let ctx = error_context!("decode_report", "profile" => "reference-tablet");
/// assert!(ctx.to_string().contains("reference-tablet"));
/// ```
#[macro_export]
macro_rules! error_context {
    ($operation:expr, $($key:expr => $value:expr),* $(,)?) => {
        {
            let mut ctx = $crate::ErrorContext::new($operation);
            $(
                ctx = ctx.with($key, $value);
            )*
            ctx
        }
    };
}

/// Return early with a config error when a numeric field is not strictly positive.
#[macro_export]
macro_rules! ensure_positive {
    ($field:expr, $value:expr) => {
        if !($value > 0.0) {
            return Err($crate::ConfigError::invalid(
                $field,
                format!("must be positive, got {}", $value),
            ));
        }
    };
}
