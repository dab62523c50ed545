//! Centralized error types for InkBridge
//!
//! Every crate in the workspace reports failures through the types defined
//! here, so the glue layer can classify and surface them uniformly.
//!
//! # Architecture
//!
//! - [`common`]: Top-level error type, categories, severities and context
//! - [`sample`]: Sample normalization and HID report decode errors
//! - [`config`]: Configuration loading and validation errors
//! - [`telemetry`]: Telemetry reporting and pen-log errors
//!
//! # Hot path
//!
//! [`SampleError`] and [`DecodeError`] are produced once per input event. The
//! renderer logs and drops them; they never abort a stroke.
//!
//! # Example
//!
//! ```
//! use inkbridge_errors::prelude::*;
//!
//! fn check_width(width: f32) -> Result<f32> {
//!     if !(width > 0.0) {
//!         return Err(ConfigError::invalid("style.w_max", "must be positive").into());
//!     }
//!     Ok(width)
//! }
//!
//! assert!(check_width(10.0).is_ok());
//! assert!(check_width(0.0).is_err());
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod common;
pub mod config;
pub mod prelude;
pub mod sample;
pub mod telemetry;

pub use common::{ErrorCategory, ErrorContext, ErrorSeverity, InkBridgeError, ResultExt};
pub use config::ConfigError;
pub use sample::{DecodeError, SampleError};
pub use telemetry::TelemetryError;

/// A specialized `Result` type for InkBridge operations.
pub type Result<T> = std::result::Result<T, InkBridgeError>;
