//! TOML configuration schema types for the factory dashboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial (or empty) file is always valid.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`) parsed by
//! the `humantime` crate at the call site.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::error::ConfigError;
use crate::config::xdg;
use crate::layout::DEFAULT_LAYOUT_KEY;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// ```toml
/// [storage]
/// [dashboard]
/// [tui]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where client-local state is kept.
    pub storage: StorageConfig,
    /// Layout engine settings.
    pub dashboard: DashboardConfig,
    /// Terminal UI settings.
    pub tui: TuiConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

impl Config {
    /// Checks values that deserialize fine but are out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tui.tick_rate()?;
        if !(1..=4).contains(&self.tui.columns) {
            return Err(ConfigError::InvalidValue {
                field: "tui.columns".to_string(),
                message: format!("must be between 1 and 4, got {}", self.tui.columns),
            });
        }
        crate::storage::validate_key(&self.dashboard.layout_key).map_err(|_| {
            ConfigError::InvalidValue {
                field: "dashboard.layout_key".to_string(),
                message: format!(
                    "'{}' may only contain letters, digits, '_', '-' and '.'",
                    self.dashboard.layout_key
                ),
            }
        })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    /// One JSON file per key under `storage.dir`.
    #[default]
    File,
    /// Process-local map; nothing survives exit.
    Memory,
}

/// `[storage]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend to use.
    pub backend: StorageBackend,
    /// Storage directory. Empty string means the XDG data directory.
    pub dir: String,
    /// Byte quota across all stored values. `0` disables the quota.
    pub quota_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            dir: String::new(),
            quota_bytes: 5 * 1024 * 1024,
        }
    }
}

impl StorageConfig {
    /// Resolved storage directory (tilde-expanded, XDG default if empty).
    pub fn resolved_dir(&self) -> PathBuf {
        if self.dir.is_empty() {
            xdg::storage_dir()
        } else {
            xdg::expand_tilde(&self.dir)
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// `[dashboard]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Storage key holding the persisted widget layout.
    pub layout_key: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            layout_key: DEFAULT_LAYOUT_KEY.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// `[tui]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Input poll interval as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
    /// Number of panel columns on the dashboard grid (1..=4).
    pub columns: u16,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
            columns: 2,
        }
    }
}

impl TuiConfig {
    /// Parses `tick_rate`.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(&self.tick_rate).map_err(|e| ConfigError::InvalidValue {
            field: "tui.tick_rate".to_string(),
            message: e.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// `[logging]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity used when `FDASH_LOG` is unset.
    pub log_level: LogLevel,
    /// Log file path. Empty string means stderr (and no logging in the TUI).
    pub log_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_file: String::new(),
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// The `EnvFilter` directive for this level.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
