//! Terminal formatting for settings output.
//!
//! Format-only: no I/O and no domain decisions.

use wick_core::{QueryState, QueryStatus, Setting};

/// Widest value shown in the table before truncation.
const VALUE_WIDTH: usize = 48;

/// Truncates a string to at most `max_len` characters, adding "..." if needed.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Render settings as an aligned key/value/updated table.
pub fn settings_table(settings: &[Setting]) -> String {
    if settings.is_empty() {
        return "No settings stored.".to_string();
    }

    let key_width = settings
        .iter()
        .map(|s| s.key.chars().count())
        .max()
        .unwrap_or(0)
        .max("KEY".len());

    let value_width = VALUE_WIDTH;
    let mut out = format!("{:<key_width$}  {:<value_width$}  UPDATED\n", "KEY", "VALUE");
    out.push_str(&"-".repeat(key_width + value_width + 4 + "YYYY-MM-DD HH:MM".len()));
    for setting in settings {
        out.push('\n');
        out.push_str(&format!(
            "{:<key_width$}  {:<value_width$}  {}",
            setting.key,
            truncate_string(&setting.value, value_width),
            setting.updated_at.format("%Y-%m-%d %H:%M"),
        ));
    }
    out
}

/// One line describing a watched setting's latest state.
pub fn watch_line(key: &str, state: &QueryState<Setting>) -> String {
    match state.status {
        QueryStatus::Success => match state.data {
            Some(ref setting) => format!("{key} = {}", setting.value),
            None => format!("{key} is not set"),
        },
        QueryStatus::Error => {
            let reason = state
                .error
                .as_ref()
                .map_or_else(|| "unknown error".to_string(), ToString::to_string);
            format!("{key}: {reason}")
        }
        QueryStatus::Idle | QueryStatus::Loading => format!("{key}: loading"),
    }
}
