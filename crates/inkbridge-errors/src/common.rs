//! The crate-wide error, its classification and context helpers.

use core::fmt;

use crate::{ConfigError, SampleError, TelemetryError};

/// Any failure surfaced by the InkBridge pipeline.
#[derive(Debug, thiserror::Error)]
pub enum InkBridgeError {
    /// A pointer event or HID report could not be normalized
    #[error("Sample error: {0}")]
    Sample(#[from] SampleError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Readout queue or pen log failure
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Free-form message, usually an inner error with context prepended
    #[error("{0}")]
    Other(String),
}

impl InkBridgeError {
    /// Decode failures are split out from the rest of the sample errors so
    /// callers can count malformed reports on their own.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Sample(SampleError::Decode(_)) => ErrorCategory::Decode,
            Self::Sample(_) => ErrorCategory::Sample,
            Self::Config(_) => ErrorCategory::Config,
            Self::Telemetry(_) => ErrorCategory::Telemetry,
            Self::Io(_) => ErrorCategory::IO,
            Self::Other(_) => ErrorCategory::Other,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Sample(e) => e.severity(),
            Self::Config(e) => e.severity(),
            Self::Telemetry(e) => e.severity(),
            Self::Io(_) | Self::Other(_) => ErrorSeverity::Error,
        }
    }

    /// Everything short of [`ErrorSeverity::Critical`] leaves the pipeline usable.
    pub fn is_recoverable(&self) -> bool {
        self.severity() < ErrorSeverity::Critical
    }

    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

impl From<std::io::Error> for InkBridgeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Which layer an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    Sample = 0,
    /// Raw HID report decoding
    Decode = 1,
    Config = 2,
    Telemetry = 3,
    IO = 4,
    Other = 255,
}

impl ErrorCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sample => "Sample",
            Self::Decode => "Decode",
            Self::Config => "Config",
            Self::Telemetry => "Telemetry",
            Self::IO => "IO",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much an error costs the caller. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ErrorSeverity {
    /// Expected noise, such as a foreign report ID
    Info = 0,
    /// The event was dropped, the stream carries on
    Warning = 1,
    /// The requested operation failed
    Error = 2,
    /// The component has to stop
    Critical = 3,
}

impl ErrorSeverity {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an error happened: an operation name plus `key: value` details.
///
/// Rendered as `load_config [path: bridge.yaml, format: yaml]`.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub operation: String,
    pub fields: Vec<(String, String)>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            fields: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.operation)?;
        let mut fields = self.fields.iter();
        if let Some((key, value)) = fields.next() {
            write!(f, " [{key}: {value}")?;
            for (key, value) in fields {
                write!(f, ", {key}: {value}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}

/// Prefixes an error with an [`ErrorContext`] while lifting it into
/// [`InkBridgeError`].
pub trait ResultExt<T> {
    fn context(self, ctx: ErrorContext) -> Result<T, InkBridgeError>;

    /// Shorthand for a context that only names the operation.
    fn with_context(self, operation: impl Into<String>) -> Result<T, InkBridgeError>;
}

impl<T, E: Into<InkBridgeError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, ctx: ErrorContext) -> Result<T, InkBridgeError> {
        self.map_err(|e| InkBridgeError::Other(format!("{ctx}: {}", e.into())))
    }

    fn with_context(self, operation: impl Into<String>) -> Result<T, InkBridgeError> {
        self.context(ErrorContext::new(operation))
    }
}
