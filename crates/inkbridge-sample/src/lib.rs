//! Sample normalization for InkBridge
//!
//! Turns heterogeneous input (mouse, touch and pen pointer events, raw
//! tablet HID reports) into one [`NormalizedSample`] shape. Everything
//! downstream, the stroke renderer included, only ever sees normalized
//! samples.
//!
//! # Example
//!
//! ```
//! use inkbridge_sample::{RawPointerEvent, SurfaceGeometry, normalize_pointer};
//!
//! let raw = RawPointerEvent::new("pointerdown", "touch").at(10.0, 20.0);
//! let sample = normalize_pointer(&raw, &SurfaceGeometry::identity(800.0, 600.0))?;
//! assert!((sample.pressure - 1.0).abs() < f32::EPSILON);
//! # Ok::<(), inkbridge_errors::SampleError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod hid;
pub mod pointer;
pub mod types;

pub use hid::{
    HidContactTracker, HidReportLayout, HidSampleReader, contact_phase, decode_hid_report,
};
pub use pointer::{
    DEFAULT_MOUSE_PRESSURE, RawEventKind, RawPointerEvent, SurfaceGeometry, normalize_pointer,
    source_pressure,
};
pub use types::{
    ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, Size, SourceKind, Tilt,
    clamp_unit, finite_or_zero,
};

pub use inkbridge_errors::{DecodeError, SampleError};
