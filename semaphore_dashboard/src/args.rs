//! Command-line arguments for the dashboard.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};

/// How each refresh is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputFormat {
    /// Banner, panels, sparkline charts and legend.
    Text,
    /// One JSON document per refresh.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seconds between refreshes.
    #[clap(long, env = "SEMAPHORE_REFRESH_SECS", default_value_t = 30)]
    pub interval_secs: u64,

    /// Refresh once and exit.
    #[clap(long)]
    pub once: bool,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Also fetch three days of 30-minute bars for the charts.
    #[clap(long)]
    pub history: bool,

    /// Path to an instruments file (`role;display name;symbol` per line)
    /// replacing the default ES=F / DX=F / ^TNX set.
    #[clap(long)]
    pub instruments: Option<String>,
}
