//! Services orchestrate ports and the query cache.
//!
//! Adapters construct a [`SettingsService`] once at their composition root
//! and share it; every read and write of settings goes through it.

mod keyed_lock;
mod settings_service;
mod watch;

pub use settings_service::{SettingsService, SettingsServiceConfig};
pub use watch::SettingWatch;
