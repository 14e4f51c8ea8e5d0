//! HTTP adapter for the storefront settings API.
//!
//! Implements [`wick_core::SettingsApiPort`] over the backend's
//! `/api/settings` REST resource using reqwest.
//!
//! ```no_run
//! use std::sync::Arc;
//! use wick_core::{NoopNotifier, QueryCache, SettingsService};
//! use wick_http::{DefaultSettingsClient, SettingsClientConfig};
//!
//! # fn main() -> Result<(), wick_http::HttpError> {
//! let client = DefaultSettingsClient::new(
//!     &SettingsClientConfig::new().with_base_url("http://localhost:3000"),
//! )?;
//! let service = SettingsService::new(
//!     Arc::new(client),
//!     Arc::new(QueryCache::new()),
//!     Arc::new(NoopNotifier::new()),
//! );
//! # drop(service);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
// DefaultSettingsClient is meant to be used through SettingsApiPort, not its
// internal generic structure
#![allow(private_interfaces)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod url;

// ============================================================================
// Public API
// ============================================================================

// Client
pub use client::DefaultSettingsClient;

// Configuration
pub use config::SettingsClientConfig;

// Errors
pub use error::{HttpError, HttpResult};
