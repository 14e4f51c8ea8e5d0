//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI: the reqwest-backed settings client, the process-wide query
//! cache, the terminal notifier and the `SettingsService` over them.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;
use wick_core::{QueryCache, SettingsService, SettingsServiceConfig};
use wick_http::{DefaultSettingsClient, SettingsClientConfig};

use crate::error::CliError;
use crate::notifier::TerminalNotifier;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl CliConfig {
    /// Validate the parsed global options.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.timeout_secs == 0 {
            return Err(CliError::Config(
                "timeout must be at least one second".to_string(),
            ));
        }
        if cli.poll_interval_ms == 0 {
            return Err(CliError::Config(
                "poll interval must be at least one millisecond".to_string(),
            ));
        }

        Ok(Self {
            api_url: cli.api_url.clone(),
            token: cli.token.clone().filter(|token| !token.is_empty()),
            timeout: Duration::from_secs(cli.timeout_secs),
            poll_interval: Duration::from_millis(cli.poll_interval_ms),
        })
    }

    fn client_config(&self) -> SettingsClientConfig {
        SettingsClientConfig::new()
            .with_base_url(self.api_url.clone())
            .with_timeout(self.timeout)
            .with_optional_token(self.token.clone())
    }

    fn service_config(&self) -> SettingsServiceConfig {
        SettingsServiceConfig {
            poll_interval: self.poll_interval,
            ..SettingsServiceConfig::default()
        }
    }
}

/// Fully composed context for CLI commands.
pub struct CliContext {
    pub settings: SettingsService,
}

impl CliContext {
    pub const fn settings(&self) -> &SettingsService {
        &self.settings
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext, CliError> {
    debug!(api_url = %config.api_url, "Bootstrapping settings client");

    let client = DefaultSettingsClient::new(&config.client_config())?;
    let settings = SettingsService::with_config(
        Arc::new(client),
        Arc::new(QueryCache::new()),
        Arc::new(TerminalNotifier::new()),
        config.service_config(),
    );

    Ok(CliContext { settings })
}
