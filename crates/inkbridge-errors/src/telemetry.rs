//! Telemetry reporting and pen-log errors.

use crate::common::ErrorSeverity;

/// Telemetry errors. None of these ever reach the draw path.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The bounded queue was full and the record was dropped
    #[error("telemetry queue full ({capacity} records), record dropped")]
    QueueFull {
        /// Queue capacity
        capacity: usize,
    },

    /// The receiving side of the channel has gone away
    #[error("telemetry channel closed")]
    ChannelClosed,

    /// Writing to the persisted pen log failed
    #[error("pen log write failed: {0}")]
    LogWrite(#[source] std::io::Error),
}

impl TelemetryError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TelemetryError::QueueFull { .. } => ErrorSeverity::Info,
            TelemetryError::ChannelClosed => ErrorSeverity::Warning,
            TelemetryError::LogWrite(_) => ErrorSeverity::Error,
        }
    }
}
