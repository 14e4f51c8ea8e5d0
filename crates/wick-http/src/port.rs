//! `SettingsApiPort` implementation for `SettingsClient`.

use async_trait::async_trait;
use wick_core::ports::STATUS_NOT_FOUND;
use wick_core::{ApiError, NewSetting, Probe, Setting, SettingUpdate, SettingsApiPort};

use crate::client::SettingsClient;
use crate::error::HttpError;
use crate::http::HttpBackend;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert an adapter error to the core `ApiError`.
fn map_error(err: HttpError) -> ApiError {
    match err {
        HttpError::Status { status, message } => ApiError::Status { status, message },
        HttpError::Network(e) => ApiError::Network {
            message: e.to_string(),
        },
        HttpError::JsonParse(e) => ApiError::InvalidResponse {
            message: e.to_string(),
        },
        other @ (HttpError::ClientBuild(_)
        | HttpError::InvalidUrl(_)
        | HttpError::UnsupportedBaseUrl { .. }
        | HttpError::UnaddressableKey { .. }
        | HttpError::InvalidToken) => ApiError::Network {
            message: other.to_string(),
        },
    }
}

// ============================================================================
// Port Implementation
// ============================================================================

#[async_trait]
impl<B: HttpBackend> SettingsApiPort for SettingsClient<B> {
    async fn list(&self) -> Result<Vec<Setting>, ApiError> {
        self.list_settings().await.map_err(map_error)
    }

    async fn fetch(&self, key: &str) -> Result<Probe, ApiError> {
        match self.get_setting(key).await {
            Ok(setting) => Ok(Probe::Found(setting)),
            Err(err) if err.status() == Some(STATUS_NOT_FOUND) => Ok(Probe::NotFound),
            Err(err) => Err(map_error(err)),
        }
    }

    async fn create(&self, setting: &NewSetting) -> Result<Setting, ApiError> {
        self.create_setting(setting).await.map_err(map_error)
    }

    async fn update(&self, key: &str, update: &SettingUpdate) -> Result<Setting, ApiError> {
        self.update_setting(key, update).await.map_err(map_error)
    }

    async fn delete(&self, key: &str) -> Result<(), ApiError> {
        self.delete_setting(key).await.map_err(map_error)
    }
}
