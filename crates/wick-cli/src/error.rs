//! CLI-specific error types and mappings.
//!
//! Maps `SettingsError` and `HttpError` to exit codes and user-facing
//! messages.

use thiserror::Error;
use wick_core::SettingsError;
use wick_http::HttpError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// The settings layer reported a failure.
    #[error("{0}")]
    Settings(String),

    /// The requested key does not exist.
    #[error("No setting found for key '{0}'")]
    NotFound(String),

    /// Argument validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// The backend could not be reached.
    #[error("Settings API unavailable: {0}")]
    Unavailable(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Settings(_) | Self::NotFound(_) => 1,
            Self::Arguments(_) => 2,    // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::Network { message } => Self::Unavailable(message),
            SettingsError::InvalidKey => Self::Arguments(SettingsError::InvalidKey.to_string()),
            other => Self::Settings(other.to_string()),
        }
    }
}

impl From<HttpError> for CliError {
    fn from(err: HttpError) -> Self {
        Self::Config(err.to_string())
    }
}
