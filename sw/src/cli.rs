//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SyncWatch - wallet synchronization progress monitor
#[derive(Parser)]
#[command(
    name = "syncwatch",
    about = "Progress, ETA and error tracking for two-phase wallet synchronization"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Drive the monitor with synthetic sources and stream its notifications
    Simulate {
        /// Number of blocks the synthetic node reports
        #[arg(long, default_value = "120")]
        blocks: u64,

        /// Number of UTXOs the synthetic scanner reports
        #[arg(long, default_value = "48")]
        utxos: u64,

        /// Milliseconds between synthetic updates
        #[arg(long, default_value = "25")]
        tick_ms: u64,

        /// Sync without a local node (scan phase only)
        #[arg(long)]
        no_local_node: bool,

        /// Start in wallet-creation mode
        #[arg(long)]
        creating: bool,
    },
}
