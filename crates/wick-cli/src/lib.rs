//! The `wick` command-line back office.
//!
//! Reads and edits storefront settings through [`wick_core::SettingsService`]
//! over the HTTP adapter in `wick-http`.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::{Commands, SettingsCommand};
pub use error::CliError;
pub use notifier::TerminalNotifier;
pub use parser::Cli;
