//! Settings REST client.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;
use wick_core::{NewSetting, Setting, SettingUpdate};

use crate::config::SettingsClientConfig;
use crate::error::{HttpError, HttpResult};
use crate::http::{ApiRequest, HttpBackend, Method, RawResponse, ReqwestBackend};
use crate::url::Endpoints;

// ============================================================================
// Type Aliases
// ============================================================================

/// Settings client using the reqwest HTTP backend.
pub type DefaultSettingsClient = SettingsClient<ReqwestBackend>;

// ============================================================================
// Client
// ============================================================================

/// Client for the backend's `/api/settings` resource.
///
/// Generic over the HTTP backend so tests can inject a fake. External code
/// uses `DefaultSettingsClient` through `SettingsApiPort`.
pub struct SettingsClient<B: HttpBackend> {
    pub(crate) backend: B,
    pub(crate) endpoints: Endpoints,
}

impl DefaultSettingsClient {
    /// Create a client for the configured backend.
    pub fn new(config: &SettingsClientConfig) -> HttpResult<Self> {
        Ok(Self {
            endpoints: Endpoints::new(&config.base_url)?,
            backend: ReqwestBackend::new(config)?,
        })
    }
}

impl<B: HttpBackend> SettingsClient<B> {
    #[cfg(test)]
    pub(crate) const fn with_backend(endpoints: Endpoints, backend: B) -> Self {
        Self { backend, endpoints }
    }

    pub async fn list_settings(&self) -> HttpResult<Vec<Setting>> {
        let url = self.endpoints.collection().clone();
        let response = self.send(ApiRequest::new(Method::Get, url)).await?;
        decode(&response)
    }

    pub async fn get_setting(&self, key: &str) -> HttpResult<Setting> {
        let url = self.endpoints.entry(key)?;
        let response = self.send(ApiRequest::new(Method::Get, url)).await?;
        decode(&response)
    }

    pub async fn create_setting(&self, setting: &NewSetting) -> HttpResult<Setting> {
        let url = self.endpoints.collection().clone();
        let body = serde_json::to_value(setting)?;
        let response = self
            .send(ApiRequest::new(Method::Post, url).with_json(body))
            .await?;
        decode(&response)
    }

    pub async fn update_setting(&self, key: &str, update: &SettingUpdate) -> HttpResult<Setting> {
        let url = self.endpoints.entry(key)?;
        let body = serde_json::to_value(update)?;
        let response = self
            .send(ApiRequest::new(Method::Put, url).with_json(body))
            .await?;
        decode(&response)
    }

    /// Delete `key`. Any success status counts; the body is ignored.
    pub async fn delete_setting(&self, key: &str) -> HttpResult<()> {
        let url = self.endpoints.entry(key)?;
        self.send(ApiRequest::new(Method::Delete, url)).await?;
        Ok(())
    }

    /// Execute `request`, turning non-success statuses into errors.
    async fn send(&self, request: ApiRequest) -> HttpResult<RawResponse> {
        let method = request.method;
        let url = request.url.clone();
        let response = self.backend.execute(request).await?;
        if response.is_success() {
            return Ok(response);
        }

        let message = error_message(response.status, &response.body);
        if response.status >= 500 {
            warn!(%method, %url, status = response.status, %message, "Settings API server error");
        }
        Err(HttpError::Status {
            status: response.status,
            message,
        })
    }
}

fn decode<T: DeserializeOwned>(response: &RawResponse) -> HttpResult<T> {
    Ok(serde_json::from_str(&response.body)?)
}

/// Error body shapes the backend uses.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Extract the user-facing message from an error response.
///
/// Prefers `{"error": ..}`, then `{"message": ..}`, then the raw body, and
/// finally the status' reason phrase.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .map_or_else(|| format!("HTTP {status}"), ToString::to_string)
}
