//! Stroke rendering for InkBridge
//!
//! [`StrokeRenderer`] runs one Idle/Drawing state machine per pointer and
//! turns normalized samples into midpoint-quadratic [`Segment`]s on any
//! [`DrawingSurface`]. Colors and widths come from a [`StylePolicyTable`]
//! keyed by device kind.
//!
//! ```
//! use inkbridge_sample::{ButtonMask, NormalizedSample, Point, PointerId, SamplePhase, SourceKind, Tilt};
//! use inkbridge_stroke::{RecordingSurface, RenderOutcome, StrokeRenderer, StylePolicyTable};
//!
//! let mut renderer = StrokeRenderer::new(RecordingSurface::new(100.0, 100.0), StylePolicyTable::default());
//! let mut sample = NormalizedSample {
//!     position: Point::ORIGIN,
//!     pressure: 0.5,
//!     tilt: Tilt::default(),
//!     rotation: 0.0,
//!     buttons: ButtonMask::TIP,
//!     source: SourceKind::Pen,
//!     phase: SamplePhase::Down,
//!     pointer_id: PointerId(1),
//!     screen_position: Point::ORIGIN,
//! };
//! assert_eq!(renderer.process(&sample), RenderOutcome::StrokeStarted);
//!
//! sample.phase = SamplePhase::Move;
//! sample.position = Point::new(10.0, 0.0);
//! assert_eq!(renderer.process(&sample), RenderOutcome::Segment);
//! assert_eq!(renderer.surface().stroke_count(), 1);
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod color;
pub mod renderer;
pub mod segment;
pub mod style;
pub mod surface;

pub use color::InkColor;
pub use renderer::{RenderOutcome, RendererStats, SkipReason, StrokeRenderer, StrokeState};
pub use segment::Segment;
pub use style::{
    DEFAULT_ERASER_WIDTH, DEFAULT_MAX_WIDTH, DEFAULT_TOUCH_WIDTH, ResolvedStyle, StylePolicy,
    StylePolicyTable, TILT_WIDTH_FACTOR, WidthRule,
};
pub use surface::{DrawOp, DrawingSurface, LineCap, RecordingSurface, StrokeStyle, SvgSurface};
