//! Error types of the HTTP adapter.
//!
//! Request-time errors are mapped to `wick_core::ApiError` at the port
//! boundary; construction errors reach callers as they are.

use thiserror::Error;

/// Result type alias for HTTP adapter operations.
pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Error)]
pub enum HttpError {
    /// The backend answered with a non-success status.
    #[error("Settings API request failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// The configured base URL did not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The configured base URL is not an http(s) origin.
    #[error("Unsupported base URL '{url}': expected an http or https URL")]
    UnsupportedBaseUrl { url: String },

    /// The key cannot be expressed as its own path segment.
    #[error("Setting key '{key}' cannot be addressed in a URL path")]
    UnaddressableKey { key: String },

    /// The bearer token cannot be sent as a header value.
    #[error("API token contains characters not allowed in an HTTP header")]
    InvalidToken,

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl HttpError {
    /// The HTTP status, when the backend answered.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
