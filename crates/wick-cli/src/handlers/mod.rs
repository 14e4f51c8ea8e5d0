//! Command handlers that delegate to `SettingsService`.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that:
//!   1. Call `SettingsService` methods
//!   2. Turn failed reads into `CliError`s
//!   3. Format output for the terminal

pub mod settings;
