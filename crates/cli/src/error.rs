//! Error types for inkctl

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Invalid capture at line {line}: {message}")]
    InvalidCapture { line: usize, message: String },

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<inkbridge_errors::InkBridgeError> for CliError {
    fn from(err: inkbridge_errors::InkBridgeError) -> Self {
        match err {
            inkbridge_errors::InkBridgeError::Config(
                inkbridge_errors::ConfigError::ProfileNotFound(name),
            ) => CliError::ProfileNotFound(name),
            inkbridge_errors::InkBridgeError::Io(io) => CliError::IoError(io),
            other => CliError::InvalidConfiguration(other.to_string()),
        }
    }
}

impl From<inkbridge_errors::ConfigError> for CliError {
    fn from(err: inkbridge_errors::ConfigError) -> Self {
        CliError::from(inkbridge_errors::InkBridgeError::from(err))
    }
}
