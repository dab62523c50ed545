//! Shared test utilities for InkBridge.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with good error messages and `#[track_caller]`
//! - [`fixtures`] - Pointer event sequences and synthetic tablet reports
//! - [`prelude`] - Convenience re-exports
//!
//! ```rust,ignore
//! use inkbridge_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]

pub mod fixtures;
pub mod must;
pub mod prelude;

pub use must::*;
