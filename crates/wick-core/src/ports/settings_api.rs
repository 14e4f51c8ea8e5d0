//! Settings API port.
//!
//! This port describes the REST contract the access layer consumes:
//!
//! | Method | Path                  | Port method |
//! |--------|-----------------------|-------------|
//! | GET    | `/api/settings`       | `list`      |
//! | GET    | `/api/settings/{key}` | `fetch`     |
//! | POST   | `/api/settings`       | `create`    |
//! | PUT    | `/api/settings/{key}` | `update`    |
//! | DELETE | `/api/settings/{key}` | `delete`    |

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewSetting, Setting, SettingUpdate};

/// HTTP status the backend uses for an absent key.
pub const STATUS_NOT_FOUND: u16 = 404;

/// Errors reported by a settings API adapter.
///
/// Adapters map their transport-specific errors into these variants at the
/// boundary so the service never sees `reqwest` or `url` types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, timeout, TLS...).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend answered with a non-success status.
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend answered, but the body could not be decoded.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },
}

impl ApiError {
    /// The HTTP status, when the backend produced one.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Network { .. } | Self::InvalidResponse { .. } => None,
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Network { message }
            | Self::Status { message, .. }
            | Self::InvalidResponse { message } => message,
        }
    }
}

/// Outcome of reading a single key.
///
/// A 404 is an expected answer, not an error: it is how the probe learns that
/// a create is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Found(Setting),
    NotFound,
}

impl Probe {
    pub fn into_setting(self) -> Option<Setting> {
        match self {
            Self::Found(setting) => Some(setting),
            Self::NotFound => None,
        }
    }
}

/// Backend operations on settings.
///
/// Implementations must report a 404 from `fetch` as `Ok(Probe::NotFound)`
/// and every other non-success status as `ApiError::Status`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsApiPort: Send + Sync {
    /// List every setting, in backend order.
    async fn list(&self) -> Result<Vec<Setting>, ApiError>;

    /// Read one setting by key.
    async fn fetch(&self, key: &str) -> Result<Probe, ApiError>;

    /// Create a setting for a key that does not exist yet.
    async fn create(&self, setting: &NewSetting) -> Result<Setting, ApiError>;

    /// Replace the value of an existing setting.
    async fn update(&self, key: &str, update: &SettingUpdate) -> Result<Setting, ApiError>;

    /// Delete a setting by key.
    async fn delete(&self, key: &str) -> Result<(), ApiError>;
}
