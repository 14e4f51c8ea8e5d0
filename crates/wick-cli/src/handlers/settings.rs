//! `wick settings` handlers.
//!
//! Data goes to stdout; write confirmations and failures are reported by the
//! service through the terminal notifier on stderr.

use anyhow::Result;
use tracing::{debug, warn};
use wick_core::{QueryState, QueryStatus, SettingsService, keys};

use crate::bootstrap::CliContext;
use crate::commands::SettingsCommand;
use crate::error::CliError;
use crate::presentation::{settings_table, watch_line};

/// Execute a settings subcommand.
pub async fn execute(ctx: &CliContext, command: SettingsCommand) -> Result<()> {
    let settings = ctx.settings();
    match command {
        SettingsCommand::List { json } => list(settings, json).await,
        SettingsCommand::Get { key, json } => get(settings, &key, json).await,
        SettingsCommand::Value { key, default } => {
            println!("{}", settings.get_value(&key, &default).await);
            Ok(())
        }
        SettingsCommand::Set { key, value } => {
            if let Some(notice) = unknown_key_notice(&key) {
                warn!(key, "{notice}");
            }
            settings.upsert(&key, &value).await.map_err(CliError::from)?;
            Ok(())
        }
        SettingsCommand::Rm { key } => {
            settings.remove(&key).await.map_err(CliError::from)?;
            Ok(())
        }
        SettingsCommand::Watch { key, ticks } => watch(settings, &key, ticks).await,
    }
}

async fn list(settings: &SettingsService, json: bool) -> Result<()> {
    let mut rows = settled(settings.list_all().await)?.unwrap_or_default();
    rows.sort_by(|a, b| a.key.cmp(&b.key));

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        println!("{}", settings_table(&rows));
    }
    Ok(())
}

async fn get(settings: &SettingsService, key: &str, json: bool) -> Result<()> {
    if key.is_empty() {
        return Err(CliError::Arguments("key must not be empty".to_string()).into());
    }

    let setting = settled(settings.get_by_key(key).await)?
        .ok_or_else(|| CliError::NotFound(key.to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&setting)?);
    } else {
        println!("{}", setting.value);
    }
    Ok(())
}

async fn watch(settings: &SettingsService, key: &str, ticks: Option<u32>) -> Result<()> {
    if key.is_empty() {
        return Err(CliError::Arguments("key must not be empty".to_string()).into());
    }

    let mut watch = settings.watch(key);
    let mut seen = 0u32;
    loop {
        tokio::select! {
            state = watch.changed() => {
                let Some(state) = state else { break };
                println!("{}", watch_line(key, &state));
                seen += 1;
                if ticks.is_some_and(|limit| seen >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!(key, "Interrupted, stopping watch");
                break;
            }
        }
    }
    Ok(())
}

/// A hint for keys the back office does not manage, which are often typos.
fn unknown_key_notice(key: &str) -> Option<String> {
    if key.is_empty() || keys::is_known(key) {
        return None;
    }
    Some(format!(
        "'{key}' is not a managed setting; known keys: {}",
        keys::KNOWN_KEYS.join(", ")
    ))
}

/// The data of a finished read, or its error as a `CliError`.
fn settled<T>(state: QueryState<T>) -> Result<Option<T>, CliError> {
    match state.status {
        QueryStatus::Error => Err(state
            .error
            .map_or_else(|| CliError::Settings("read failed".to_string()), CliError::from)),
        QueryStatus::Success => Ok(state.data),
        QueryStatus::Idle | QueryStatus::Loading => Ok(None),
    }
}
