//! Configuration loading and validation errors.

use crate::common::ErrorSeverity;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A field holds a value the bridge cannot use
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue {
        /// Dotted path of the field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The document could not be parsed
    #[error("failed to parse {format} config: {message}")]
    Parse {
        /// Format name ("yaml" or "json")
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// The file extension does not map to a known format
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A named device profile does not exist
    #[error("device profile not found: {0}")]
    ProfileNotFound(String),

    /// Two device profiles share a name
    #[error("duplicate device profile: {0}")]
    DuplicateProfile(String),
}

impl ConfigError {
    /// Get the error severity.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConfigError::ProfileNotFound(_) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Create an invalid-value error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        ConfigError::Parse {
            format,
            message: message.to_string(),
        }
    }
}
