//! SyncWatch configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main SyncWatch configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local node configuration
    pub node: NodeConfig,

    /// Channel capacities for the monitor actor
    pub channels: ChannelConfig,

    /// Display strings for progress messages
    pub text: TextConfig,

    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .syncwatch.yml
        let local_config = PathBuf::from(".syncwatch.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/syncwatch/syncwatch.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("syncwatch").join("syncwatch.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level from the config file, for early logging setup
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok()?.log.level
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Local node configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Whether a local node feeds the block download phase
    #[serde(rename = "run-local-node")]
    pub run_local_node: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self { run_local_node: true }
    }
}

/// Channel capacities for the monitor actor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Buffer per inbound source channel
    #[serde(rename = "source-capacity")]
    pub source_capacity: usize,

    /// Buffer for the control-command channel
    #[serde(rename = "command-capacity")]
    pub command_capacity: usize,

    /// Buffer for the outbound broadcast bus
    #[serde(rename = "event-capacity")]
    pub event_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            source_capacity: 64,
            command_capacity: 8,
            event_capacity: 256,
        }
    }
}

/// Display strings for progress messages
///
/// The core treats these as opaque templates; localized variants are
/// supplied by whoever embeds the monitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Label for the block download phase
    #[serde(rename = "downloading-label")]
    pub downloading_label: String,

    /// Label for the scan phase; `{done}` and `{total}` are substituted
    #[serde(rename = "scanning-label")]
    pub scanning_label: String,

    /// Wrapper for the rendered estimate; `{eta}` is substituted
    #[serde(rename = "estimate-template")]
    pub estimate_template: String,

    #[serde(rename = "minutes-unit")]
    pub minutes_unit: String,

    #[serde(rename = "seconds-unit")]
    pub seconds_unit: String,
}

impl TextConfig {
    /// Wrap a rendered "<value> <unit>" estimate in the configured template
    pub fn render_estimate(&self, eta: &str) -> String {
        self.estimate_template.replace("{eta}", eta)
    }

    /// Render the scan label for the given counters
    pub fn render_scanning(&self, done: u64, total: u64) -> String {
        self.scanning_label
            .replace("{done}", &done.to_string())
            .replace("{total}", &total.to_string())
    }
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            downloading_label: "Downloading blocks".to_string(),
            scanning_label: "Scanning UTXO {done}/{total}".to_string(),
            estimate_template: "Estimated time remaining: {eta}".to_string(),
            minutes_unit: "min.".to_string(),
            seconds_unit: "sec.".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default log level when --log-level is not given
    pub level: Option<String>,
}
