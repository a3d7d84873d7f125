//! Errors raised while reading, writing, or validating `config.toml`.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a usable [`Config`](super::Config).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("Cannot read {path}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or type mismatch. `line` and `column` are 1-based, 0 when
    /// the parser gave no position.
    #[error("Invalid configuration at {path}:{line}:{column}: {message}")]
    ParseError {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// `--config` named a file that is not there.
    #[error("Configuration file not found: {path}")]
    NotFound { path: PathBuf },

    /// `config init` without `--force` over an existing file.
    #[error("Configuration file already exists: {path} (use --force to replace it)")]
    AlreadyExists { path: PathBuf },

    /// Writing the template or its backup failed.
    #[error("Cannot write {path}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsed, but rejected by [`Config::validate`](super::Config::validate).
    /// `field` is dotted, e.g. `tui.columns`.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
