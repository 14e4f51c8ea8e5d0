//! Subcommand definitions.

use clap::Subcommand;

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read and edit key/value settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

/// Settings command variants.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SettingsCommand {
    /// Show all settings
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show one setting
    Get {
        /// Setting key, e.g. storeName
        key: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a setting's value, or a default when it is absent or unreadable
    Value {
        key: String,
        /// Printed when the key has no value
        #[arg(long, short = 'd', default_value = "")]
        default: String,
    },
    /// Create or update a setting
    Set { key: String, value: String },
    /// Delete a setting
    #[command(alias = "remove")]
    Rm { key: String },
    /// Follow a setting, printing every refresh until Ctrl+C
    Watch {
        key: String,
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u32>,
    },
}
