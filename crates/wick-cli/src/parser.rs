//! Main CLI parser and top-level argument handling.
//!
//! Global options configure the connection to the settings API and may come
//! from the environment (or a `.env` file) instead of flags.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the storefront settings back office.
#[derive(Parser, Debug)]
#[command(name = "wick")]
#[command(about = "Read and edit storefront settings")]
#[command(version)]
pub struct Cli {
    /// Origin of the backend serving /api/settings
    #[arg(
        long = "api-url",
        env = "WICK_API_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    pub api_url: String,

    /// Bearer token for the admin API
    #[arg(long, env = "WICK_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(
        long = "timeout-secs",
        env = "WICK_TIMEOUT_SECS",
        default_value_t = 30,
        global = true
    )]
    pub timeout_secs: u64,

    /// Polling interval of `settings watch` in milliseconds
    #[arg(
        long = "poll-interval-ms",
        env = "WICK_POLL_INTERVAL_MS",
        default_value_t = 2000,
        global = true
    )]
    pub poll_interval_ms: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
