//! Error taxonomy of the settings access layer.
//!
//! Reads never return these as `Err`; they land in `QueryState::error`.
//! Writes return them after notifying the user.

use std::fmt;

use thiserror::Error;

use crate::ports::ApiError;

/// The write verb that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for WriteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Errors surfaced by `SettingsService`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// Transport failure on any request.
    #[error("Network error: {message}")]
    Network { message: String },

    /// The existence probe of an upsert returned neither success nor 404.
    #[error("Could not determine whether setting '{key}' exists (status {status}): {message}")]
    Probe {
        key: String,
        status: u16,
        message: String,
    },

    /// Create, update or delete failed.
    #[error("Failed to {operation} setting '{key}': {message}")]
    Write {
        key: String,
        operation: WriteOperation,
        message: String,
    },

    /// A read was answered with an unexpected status.
    #[error("Backend responded with status {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend answered with a body that could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The key is empty or made only of dots.
    #[error("Setting key must not be empty or consist only of dots")]
    InvalidKey,
}

impl SettingsError {
    /// Map a failed read.
    pub(crate) fn from_read(err: ApiError) -> Self {
        match err {
            ApiError::Network { message } => Self::Network { message },
            ApiError::Status { status, message } => Self::Backend { status, message },
            ApiError::InvalidResponse { message } => Self::InvalidResponse { message },
        }
    }

    /// Map a failed existence probe.
    pub(crate) fn from_probe(key: &str, err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => Self::Probe {
                key: key.to_string(),
                status,
                message,
            },
            other => Self::from_read(other),
        }
    }

    /// Map a failed write; the backend's message is kept verbatim.
    pub(crate) fn from_write(key: &str, operation: WriteOperation, err: &ApiError) -> Self {
        Self::Write {
            key: key.to_string(),
            operation,
            message: err.message().to_string(),
        }
    }

    /// The message suitable for a notification body.
    pub fn user_message(&self) -> String {
        match self {
            Self::Write { message, .. } | Self::Probe { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_status_maps_to_probe_error() {
        let err = SettingsError::from_probe(
            "storeName",
            ApiError::Status {
                status: 500,
                message: "Internal Server Error".to_string(),
            },
        );
        assert!(matches!(
            err,
            SettingsError::Probe { ref key, status: 500, .. } if key == "storeName"
        ));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_read_status_maps_to_backend_error() {
        let err = SettingsError::from_read(ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        });
        assert_eq!(
            err,
            SettingsError::Backend {
                status: 503,
                message: "maintenance".to_string(),
            }
        );
    }

    #[test]
    fn test_probe_network_failure_stays_network() {
        let err = SettingsError::from_probe(
            "storeName",
            ApiError::Network {
                message: "connection refused".to_string(),
            },
        );
        assert!(matches!(err, SettingsError::Network { .. }));
    }

    #[test]
    fn test_write_error_keeps_backend_message() {
        let err = SettingsError::from_write(
            "storeName",
            WriteOperation::Create,
            &ApiError::Status {
                status: 409,
                message: "key already exists".to_string(),
            },
        );
        assert_eq!(err.user_message(), "key already exists");
        assert_eq!(
            err.to_string(),
            "Failed to create setting 'storeName': key already exists"
        );
    }
}
