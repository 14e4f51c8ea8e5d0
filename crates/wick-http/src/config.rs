//! Public configuration for the settings HTTP client.

use std::time::Duration;

/// Default backend origin for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration for the settings HTTP client.
///
/// Use the builder methods to customize the client.
///
/// # Example
///
/// ```
/// use wick_http::SettingsClientConfig;
/// use std::time::Duration;
///
/// let config = SettingsClientConfig::new()
///     .with_base_url("https://shop.example.com")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct SettingsClientConfig {
    /// Origin of the backend; `/api/settings` is appended to it
    pub(crate) base_url: String,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Request timeout
    pub(crate) timeout: Duration,
    /// Optional bearer token for the admin API
    pub(crate) token: Option<String>,
}

impl Default for SettingsClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("wick-http/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            token: None,
        }
    }
}

impl SettingsClientConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend origin.
    ///
    /// Defaults to `http://localhost:3000`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `Authorization: Bearer <token>` with every request.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SettingsClientConfig::new();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.user_agent.starts_with("wick-http/"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.token.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SettingsClientConfig::new()
            .with_base_url("https://shop.example.com/")
            .with_user_agent("test-agent")
            .with_timeout(Duration::from_secs(5))
            .with_token("secret");

        assert_eq!(config.base_url(), "https://shop.example.com/");
        assert_eq!(config.user_agent, "test-agent");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_optional_token() {
        let with_token = SettingsClientConfig::new().with_optional_token(Some("t".to_string()));
        assert_eq!(with_token.token.as_deref(), Some("t"));

        let without = SettingsClientConfig::new().with_optional_token(None);
        assert!(without.token.is_none());
    }
}
