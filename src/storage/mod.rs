//! Key-value persistence surface for client-local state.
//!
//! The layout engine persists a single JSON document under a well-known key.
//! Backends implement [`KeyValueStore`]; two are provided:
//!
//! - [`FileStore`]: one file per key under a directory, written atomically
//!   (temp file, fsync, rename).
//! - [`MemoryStore`]: an `RwLock<HashMap>` for tests and `--ephemeral` runs.
//!
//! Both backends accept an optional byte quota. A write that would exceed it
//! fails with [`StorageError::QuotaExceeded`] and leaves the previous value
//! untouched.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The key contains characters the backend cannot represent.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// I/O failure while reading or writing a key.
    #[error("Storage I/O error for key '{key}'")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The value is larger than the configured quota allows.
    #[error("Storage quota exceeded for key '{key}': {needed} bytes needed, limit is {limit}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: u64,
        /// Configured limit in bytes.
        limit: u64,
    },

    /// The backend is not usable (poisoned lock, missing directory, ...).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string-keyed, string-valued store scoped to one client installation.
///
/// Implementations must be `Send + Sync` so a single store can be shared by
/// reference between the dashboard and the settings editor.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`.
    ///
    /// Either the whole value is stored or the previous value is kept.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}

/// Checks that `key` is safe to use as a file stem.
///
/// Allowed: ASCII alphanumerics, `_`, `-`, `.`; must be non-empty and must
/// not start with `.`.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
