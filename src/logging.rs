//! Logging initialization for fdash.
//!
//! Configures the `tracing` subscriber with level filtering via the `FDASH_LOG`
//! environment variable. Falls back to `logging.log_level` from the config
//! file when the variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Config level (info unless changed)
//! fdash layout show
//!
//! # Debug level
//! FDASH_LOG=debug fdash layout show
//!
//! # Module-specific filtering
//! FDASH_LOG=factory_dashboard::layout=debug,warn fdash tui
//! ```

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::LoggingConfig;
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "FDASH_LOG";

/// Builds the filter: `FDASH_LOG` if set and valid, else the config level.
pub fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_directive()))
}

/// Initialize the tracing subscriber for CLI commands.
///
/// Output goes to `logging.log_file` when set, otherwise to stderr so it
/// never mixes with command output on stdout.
///
/// A second call is a no-op.
pub fn init(config: &LoggingConfig) -> io::Result<()> {
    if config.log_file.is_empty() {
        let _ = fmt()
            .with_env_filter(build_filter(config))
            .with_target(false)
            .with_writer(io::stderr)
            .try_init();
        Ok(())
    } else {
        init_file(config)
    }
}

/// Initialize the tracing subscriber while the TUI owns the terminal.
///
/// Only a configured `logging.log_file` receives output. Without one no
/// subscriber is installed, since writes to stderr would corrupt the screen.
pub fn init_for_tui(config: &LoggingConfig) -> io::Result<()> {
    if config.log_file.is_empty() {
        return Ok(());
    }
    init_file(config)
}

fn init_file(config: &LoggingConfig) -> io::Result<()> {
    let path = xdg::expand_tilde(&config.log_file);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            xdg::ensure_dir(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    let _ = fmt()
        .with_env_filter(build_filter(config))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
