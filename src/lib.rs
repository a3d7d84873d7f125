//! Factory dashboard layout engine.
//!
//! Lets each user choose which dashboard widgets are shown and in what
//! order, persists that choice in client-local storage, and applies it when
//! the dashboard is drawn.
//!
//! - [`widgets`]: the catalog of built-in widgets and their defaults
//! - [`storage`]: key-value backends (file, memory)
//! - [`layout`]: load / save / reset, edit sessions, and render decisions
//! - [`tui`]: dashboard and settings screens
//! - [`config`], [`logging`]: ambient setup for the `fdash` binary

use std::path::PathBuf;

/// Configuration loading, defaults, and XDG path resolution.
pub mod config;

/// Layout engine: persisted configuration, editing, and rendering decisions.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Client-local key-value storage backends.
pub mod storage;

/// TUI module providing the terminal user interface for the dashboard.
pub mod tui;

/// Widget catalog and registry defaults.
pub mod widgets;

use config::{Config, StorageBackend};
use layout::LayoutStore;
use storage::{FileStore, KeyValueStore, MemoryStore};
use widgets::WidgetRegistry;

/// Type-erased storage backend chosen at runtime.
pub type DynStore = Box<dyn KeyValueStore>;

/// Command-line overrides applied on top of the `[storage]` config section.
#[derive(Debug, Clone, Default)]
pub struct StorageOverrides {
    /// Use this directory instead of `storage.dir`.
    pub dir: Option<PathBuf>,
    /// Force the in-memory backend.
    pub ephemeral: bool,
}

/// Opens the storage backend described by `config` and `overrides`.
pub fn open_backend(config: &Config, overrides: &StorageOverrides) -> DynStore {
    let quota = config.storage.quota_bytes;
    let backend = if overrides.ephemeral {
        StorageBackend::Memory
    } else {
        config.storage.backend
    };
    match backend {
        StorageBackend::Memory => {
            tracing::debug!("using in-memory storage");
            Box::new(MemoryStore::with_quota(quota))
        }
        StorageBackend::File => {
            let dir = overrides
                .dir
                .clone()
                .unwrap_or_else(|| config.storage.resolved_dir());
            tracing::debug!("using file storage at {}", dir.display());
            Box::new(FileStore::new(dir).with_quota(quota))
        }
    }
}

/// Opens the layout store for the built-in widget catalog.
pub fn open_layout_store(config: &Config, overrides: &StorageOverrides) -> LayoutStore<DynStore> {
    LayoutStore::new(open_backend(config, overrides), WidgetRegistry::new())
        .with_key(config.dashboard.layout_key.clone())
}
