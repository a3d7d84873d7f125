//! Configuration file loader with position-aware error reporting.
//!
//! Loads TOML configuration from a specific path or the default XDG location.
//! When the default location has no file, returns `Config::default()`.

use std::fs;
use std::path::Path;

use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::config::xdg;

/// Stateless configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a specific path.
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or
    /// `ConfigError::ReadError` for other I/O failures.
    pub fn load_from_path(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        let config = Self::parse_toml(&content, path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default XDG location.
    ///
    /// If no file exists at the default path, returns `Config::default()`
    /// instead of an error.
    pub fn load_default() -> Result<Config, ConfigError> {
        let path = xdg::config_path();
        if path.exists() {
            Self::load_from_path(&path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Config::default())
        }
    }

    /// Load from `path` if given, else from the default location.
    pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load_default(),
        }
    }

    /// Parses `content`, reporting syntax and type errors with their position.
    fn parse_toml(content: &str, path: &Path) -> Result<Config, ConfigError> {
        toml::from_str(content).map_err(|e| {
            let (line, column) = e
                .span()
                .map(|span| line_column(content, span.start))
                .unwrap_or((0, 0));
            ConfigError::ParseError {
                path: path.to_path_buf(),
                line,
                column,
                message: e.message().to_string(),
            }
        })
    }
}

/// 1-based line and column of byte `offset` in `content`.
fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line_start = before.rfind('\n').map_or(0, |p| p + 1);
    (before.matches('\n').count() + 1, offset - line_start + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::StorageBackend;
    use serial_test::serial;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> std::path::PathBuf {
        let file = dir.path().join("config.toml");
        fs::write(&file, body).expect("failed to write temp config");
        file
    }

    #[test]
    fn storage_and_dashboard_sections_are_read() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = write_config(
            &dir,
            r#"
[storage]
backend = "memory"
quota_bytes = 0

[dashboard]
layout_key = "plant_a_widgets"
"#,
        );
        let config = ConfigLoader::load_from_path(&file).expect("should load");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.quota_bytes, 0);
        assert_eq!(config.dashboard.layout_key, "plant_a_widgets");
        assert_eq!(config.tui, Config::default().tui);
    }

    #[test]
    fn unknown_backend_is_a_parse_error_with_position() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = write_config(&dir, "[storage]\nbackend = \"sqlite\"\n");
        match ConfigLoader::load_from_path(&file).expect_err("sqlite is not a backend") {
            ConfigError::ParseError { line, column, .. } => {
                assert_eq!(line, 2);
                assert!(column > 1, "column should point into the value");
            }
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    #[test]
    fn layout_key_with_path_separator_fails_validation() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = write_config(&dir, "[dashboard]\nlayout_key = \"../escape\"\n");
        match ConfigLoader::load_from_path(&file).expect_err("key must be rejected") {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "dashboard.layout_key"),
            other => panic!("expected InvalidValue, got: {other:?}"),
        }
    }

    #[test]
    fn unparsable_tick_rate_fails_validation() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let file = write_config(&dir, "[tui]\ntick_rate = \"soon\"\n");
        assert!(matches!(
            ConfigLoader::load_from_path(&file),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn explicit_missing_path_is_not_found() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            ConfigLoader::load(Some(&path)),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    #[serial]
    fn default_location_without_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("XDG_CONFIG_HOME", dir.path());

        let loaded = ConfigLoader::load(None);

        match original {
            Some(v) => std::env::set_var("XDG_CONFIG_HOME", v),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }
        assert_eq!(loaded.expect("defaults"), Config::default());
    }

    #[test]
    fn line_column_counts_from_one() {
        assert_eq!(line_column("abc", 0), (1, 1));
        assert_eq!(line_column("a\nbc", 3), (2, 2));
    }
}
