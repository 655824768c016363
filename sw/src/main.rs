//! SyncWatch - wallet synchronization progress monitor
//!
//! CLI entry point. The only subcommand drives the monitor with synthetic
//! sources, standing in for the wallet application that embeds the core.

use std::time::Duration;

use clap::{CommandFactory, Parser};
use eyre::{Context, Result};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use syncwatch::cli::{Cli, Command};
use syncwatch::config::Config;
use syncwatch::events::SyncEvent;
use syncwatch::monitor::{ProgressUpdate, SyncMonitor, source_channels};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = if let Some(s) = level_str {
        match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        }
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Simulate {
            blocks,
            utxos,
            tick_ms,
            no_local_node,
            creating,
        }) => {
            if no_local_node {
                config.node.run_local_node = false;
            }
            cmd_simulate(config, blocks, utxos, tick_ms, creating).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

/// Run one synthetic sync attempt and print the monitor's notifications
async fn cmd_simulate(config: Config, blocks: u64, utxos: u64, tick_ms: u64, creating: bool) -> Result<()> {
    // A phase with a zero total can never finish; a synthetic source
    // always has at least one unit of work.
    let blocks = blocks.max(1);
    let utxos = utxos.max(1);
    let run_local_node = config.node.run_local_node;
    let (senders, streams) = source_channels(config.channels.source_capacity);
    let monitor = SyncMonitor::spawn(config, streams);
    let mut events = monitor.subscribe();

    if creating {
        let _ = senders.mode.send(true).await;
    }

    let tick = Duration::from_millis(tick_ms);
    let node_tx = senders.node.clone();
    let scan_tx = senders.scan.clone();
    let feeder = tokio::spawn(async move {
        // The scanner announces its totals up front, like a wallet that
        // already knows its UTXO set size.
        if scan_tx.send(ProgressUpdate::new(0, utxos)).await.is_err() {
            return;
        }
        if run_local_node {
            for done in 0..=blocks {
                if node_tx.send(ProgressUpdate::new(done, blocks)).await.is_err() {
                    return;
                }
                tokio::time::sleep(tick).await;
            }
        }
        for done in 1..=utxos {
            if scan_tx.send(ProgressUpdate::new(done, utxos)).await.is_err() {
                return;
            }
            tokio::time::sleep(tick).await;
        }
    });

    loop {
        match events.recv().await {
            Ok(SyncEvent::MessageChanged { message }) => println!("{message}"),
            Ok(SyncEvent::ProgressChanged { fraction }) => debug!(fraction, "progress"),
            Ok(SyncEvent::SyncCompleted) => {
                println!("sync completed");
                break;
            }
            Ok(SyncEvent::SyncCompletedWithError) => {
                println!("sync completed with errors");
                break;
            }
            Ok(SyncEvent::ErrorRaised { category, description }) => {
                println!("[{}] {}", category.label(), description);
            }
            Ok(SyncEvent::WalletReset) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "event consumer lagged");
            }
            Err(RecvError::Closed) => break,
        }
    }

    let _ = feeder.await;
    monitor.shutdown().await.ok();
    Ok(())
}
