//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()`
//! and functions to write it to the XDG config path (or an explicit one).

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
/// Sections: `[storage]`, `[dashboard]`, `[tui]`, `[logging]`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Factory Dashboard Configuration
#
# This file was auto-generated with default values.
# All values shown below are the built-in defaults.
#
# Location: $XDG_CONFIG_HOME/factory-dashboard/config.toml

# ==============================================================================
# Storage
# ==============================================================================

[storage]

# Where client-local state (the widget layout) is kept.
# Options: "file", "memory"
#   file   - one JSON file per key under `dir`
#   memory - kept in process only, lost on exit
backend = "file"

# Storage directory for the file backend.
# Empty string means $XDG_DATA_HOME/factory-dashboard/storage.
# Tilde (~) is expanded to the user's home directory.
dir = ""

# Total bytes all stored values may occupy. Saves that would exceed it fail
# and the previously stored layout is kept. 0 disables the quota.
quota_bytes = 5242880

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Storage key holding the widget layout.
# Letters, digits, '_', '-' and '.' only.
layout_key = "dashboard_widgets"

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# Input poll interval as a human-readable duration.
# Examples: "100ms", "250ms", "1s"
tick_rate = "250ms"

# Number of panel columns on the dashboard grid (1 to 4).
columns = 2

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Verbosity when the FDASH_LOG environment variable is unset.
# Options: "error", "warn", "info", "debug", "trace"
log_level = "info"

# Path to log file. Empty string means stderr for CLI commands and
# no log output at all while the TUI owns the terminal.
log_file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file at the XDG path.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    create_default_config_at(&xdg::config_path(), force)
}

/// Creates (or force-overwrites) the default config file at `path`.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    Ok(path.to_path_buf())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            xdg::ensure_dir(parent).map_err(write_error)?;
        }
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(write_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_error)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
