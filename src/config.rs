//! Configuration management for Mint Editor

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::logging::{resolve_data_root, Severity};

/// Product directory under the user-data root
pub const PRODUCT_NAME: &str = "MintEditor";

/// Source name printed on every log line unless configured otherwise
pub const DEFAULT_SOURCE_NAME: &str = "EditorLogger";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Overrides the user-data root resolved from the environment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Source name printed on every log line (default: "EditorLogger")
    #[serde(default = "default_log_source_name")]
    pub log_source_name: String,

    /// Minimum severity written to the sinks
    /// When unset: trace in debug builds, info in release builds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<Severity>,

    /// Colour console lines by severity when stdout is a terminal
    #[serde(default = "default_colored_console")]
    pub colored_console: bool,

    /// Backups older than this many days are deleted at startup (0 = keep all)
    #[serde(default)]
    pub backup_retention_days: u64,

    /// Interval between checks while waiting for the editor to stop (default: 100ms)
    #[serde(default = "default_shutdown_poll_interval_ms")]
    pub shutdown_poll_interval_ms: u64,

    /// Longest the editor loop goes without checking for a stop request (default: 16ms)
    #[serde(default = "default_editor_tick_ms")]
    pub editor_tick_ms: u64,
}

fn default_log_source_name() -> String {
    DEFAULT_SOURCE_NAME.to_string()
}

fn default_colored_console() -> bool {
    true
}

fn default_shutdown_poll_interval_ms() -> u64 {
    100
}

fn default_editor_tick_ms() -> u64 {
    16 // ~60 frames per second
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            log_source_name: default_log_source_name(),
            log_level: None,
            colored_console: default_colored_console(),
            backup_retention_days: 0,
            shutdown_poll_interval_ms: default_shutdown_poll_interval_ms(),
            editor_tick_ms: default_editor_tick_ms(),
        }
    }
}

impl Config {
    /// Load configuration from the product directory, or return default if not found
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Effective log threshold
    pub fn threshold(&self) -> Severity {
        self.log_level.unwrap_or_else(Severity::default_threshold)
    }

    pub fn shutdown_poll_interval(&self) -> Duration {
        Duration::from_millis(self.shutdown_poll_interval_ms.max(1))
    }

    pub fn editor_tick(&self) -> Duration {
        Duration::from_millis(self.editor_tick_ms.max(1))
    }
}

/// Get the product directory (<data root>/MintEditor)
///
/// Returns None when no data root can be resolved from the environment.
pub fn try_product_dir() -> Option<PathBuf> {
    resolve_data_root().ok().map(|root| root.join(PRODUCT_NAME))
}

/// Get the path to the config file
pub fn config_file_path() -> Option<PathBuf> {
    try_product_dir().map(|dir| dir.join("config.toml"))
}
