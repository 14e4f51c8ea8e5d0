//! Core of the wick settings access layer.
//!
//! This crate owns the storefront's settings domain types, the port traits
//! that adapters implement (HTTP API, user notifications), the process-wide
//! query cache, and [`SettingsService`], which ties them together.
//!
//! Nothing in here knows about HTTP, terminals or databases; adapters live in
//! `wick-http` and `wick-cli`.

#![deny(unsafe_code)]

pub mod cache;
pub mod domain;
pub mod error;
pub mod keys;
pub mod ports;
pub mod services;

// Re-export commonly used types for convenience
pub use cache::{CacheEvent, QueryCache, QueryKey, QueryOptions, QueryState, QueryStatus};
pub use domain::{NewSetting, Setting, SettingUpdate};
pub use error::{SettingsError, WriteOperation};
pub use ports::{
    ApiError, NoopNotifier, Notification, Notifier, Probe, SettingsApiPort, Severity,
};
pub use services::{SettingWatch, SettingsService, SettingsServiceConfig};
