//! Render-step telemetry for InkBridge
//!
//! The renderer offers one [`TelemetryRecord`] per processed sample to a
//! [`TelemetrySink`] after issuing the draw call. Sinks never block. A
//! [`TelemetryPump`] drains them off the draw path into a rate-limited
//! [`DisplaySink`] and, optionally, an append-only [`PenLog`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod display;
pub mod pen_log;
pub mod probe;
pub mod pump;
pub mod queue;
pub mod rate_limiter;
pub mod record;
pub mod sink;

pub use display::DisplaySink;
pub use pen_log::PenLog;
pub use probe::CapabilityProbe;
pub use pump::{PumpStats, TelemetryPump};
pub use queue::TelemetryQueue;
pub use rate_limiter::{DEFAULT_RATE_HZ, RateLimiter, RateLimiterStats};
pub use record::TelemetryRecord;
pub use sink::{ChannelSink, NullSink, TelemetrySink};

pub use inkbridge_errors::TelemetryError;
