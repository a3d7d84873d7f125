//! File-backed storage: one JSON file per key.
//!
//! Writes follow the temp-file-then-rename pattern:
//! 1. Write the value to `<key>.json.tmp.<timestamp>.<pid>`
//! 2. Fsync the temp file
//! 3. Rename it over `<key>.json`
//!
//! Readers therefore see either the old value or the new one, never a
//! partial write. If any step fails the temp file is removed.

use super::{validate_key, KeyValueStore, StorageError, StorageResult};
use crate::config::xdg;
use chrono::Local;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const EXTENSION: &str = "json";

/// Directory-backed key-value store.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes: None,
        }
    }

    /// Sets a byte quota over all values in the directory. `0` disables it.
    pub fn with_quota(mut self, quota_bytes: u64) -> Self {
        self.quota_bytes = (quota_bytes > 0).then_some(quota_bytes);
        self
    }

    /// Root directory of this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file holding `key`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.{EXTENSION}")))
    }

    /// Sum of the sizes of all stored values except `key`.
    fn used_bytes_excluding(&self, key: &str) -> io::Result<u64> {
        let target = format!("{key}.{EXTENSION}");
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };
        let mut total = 0;
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name == target || !name.ends_with(&format!(".{EXTENSION}")) {
                continue;
            }
            total += entry.metadata()?.len();
        }
        Ok(total)
    }

    fn write_atomic(&self, key: &str, path: &Path, value: &str) -> io::Result<()> {
        if !self.dir.is_dir() {
            xdg::ensure_dir(&self.dir)?;
        }
        let timestamp = Local::now().format("%Y%m%d-%H%M%S%.3f");
        let temp_path = self.dir.join(format!(
            "{key}.{EXTENSION}.tmp.{timestamp}.{}",
            std::process::id()
        ));

        let result = (|| {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&temp_path, path)
        })();

        if result.is_err() {
            // Best effort: the target file is untouched, only the temp remains.
            let _ = fs::remove_file(&temp_path);
        }
        result
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io {
                key: key.to_string(),
                source: e,
            }),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        if let Some(limit) = self.quota_bytes {
            let used = self
                .used_bytes_excluding(key)
                .map_err(|e| StorageError::Io {
                    key: key.to_string(),
                    source: e,
                })?;
            let needed = used + value.len() as u64;
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.write_atomic(key, &path, value)
            .map_err(|e| StorageError::Io {
                key: key.to_string(),
                source: e,
            })?;
        tracing::debug!("stored {} bytes at {}", value.len(), path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io {
                key: key.to_string(),
                source: e,
            }),
        }
    }
}
