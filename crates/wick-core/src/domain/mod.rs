//! Domain types for the settings access layer.
//!
//! These types are the single source of truth shared by the HTTP adapter,
//! the cache and the CLI. They carry the backend's wire names via serde.

mod setting;

pub use setting::{NewSetting, Setting, SettingUpdate};
