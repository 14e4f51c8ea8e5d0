//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the settings access layer expects from
//! infrastructure. They contain no implementation details and use only
//! domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `http` types in any signature
//! - Status codes travel as plain `u16`
//! - The notification surface is fire-and-forget

pub mod notifier;
pub mod settings_api;

pub use notifier::{NoopNotifier, Notification, Notifier, Severity};
pub use settings_api::{ApiError, Probe, STATUS_NOT_FOUND, SettingsApiPort};

#[cfg(test)]
pub use settings_api::MockSettingsApiPort;
