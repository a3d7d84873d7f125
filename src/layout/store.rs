//! Layout persistence: load, save, reset.
//!
//! The store owns the bridge between a [`KeyValueStore`] and the rest of the
//! layout engine. Reads never fail from the caller's point of view: an
//! absent, unreadable, or unparsable value degrades to registry defaults.
//! Writes replace the stored value wholesale and surface backend failures.
//!
//! # Stored format
//!
//! A JSON array of `{id, title, visible, order}` records with no version
//! field. Records with missing fields are accepted; each missing field falls
//! back to the registry default for that id (or, for ids the registry does
//! not know, to `title = id`, `visible = true`, and an `order` after the
//! highest one present).

use crate::layout::{LayoutConfiguration, LayoutError, WidgetDescriptor};
use crate::storage::KeyValueStore;
use crate::widgets::WidgetRegistry;
use serde::Deserialize;
use std::collections::HashSet;

/// Storage key used when none is configured.
pub const DEFAULT_LAYOUT_KEY: &str = "dashboard_widgets";

/// One persisted record, with every field but `id` optional.
#[derive(Debug, Deserialize)]
struct StoredDescriptor {
    id: String,
    title: Option<String>,
    visible: Option<bool>,
    order: Option<u32>,
}

/// Persistent home of the committed layout configuration.
///
/// Constructed once and passed by reference to both the dashboard renderer
/// and the settings editor.
#[derive(Debug)]
pub struct LayoutStore<S> {
    backend: S,
    key: String,
    registry: WidgetRegistry,
}

impl<S: KeyValueStore> LayoutStore<S> {
    /// Creates a store over `backend` using [`DEFAULT_LAYOUT_KEY`].
    pub fn new(backend: S, registry: WidgetRegistry) -> Self {
        Self {
            backend,
            key: DEFAULT_LAYOUT_KEY.to_string(),
            registry,
        }
    }

    /// Uses `key` instead of the default storage key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key holding the configuration.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registry supplying defaults.
    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// Underlying storage backend.
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Reads the persisted configuration.
    ///
    /// Returns registry defaults if nothing is stored, if the backend read
    /// fails, or if the stored value cannot be parsed. Failures are logged,
    /// never returned.
    pub fn load(&self) -> LayoutConfiguration {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no layout stored under '{}', using defaults", self.key);
                return self.registry.defaults();
            }
            Err(e) => {
                tracing::warn!("failed to read layout '{}': {}; using defaults", self.key, e);
                return self.registry.defaults();
            }
        };

        match decode(&raw, &self.registry) {
            Ok(config) => {
                if !config.has_unique_orders() {
                    tracing::warn!(
                        "layout '{}' has duplicate order values; display order may be unstable",
                        self.key
                    );
                }
                config
            }
            Err(e) => {
                tracing::warn!("failed to parse layout '{}': {}; using defaults", self.key, e);
                self.registry.defaults()
            }
        }
    }

    /// [`load`](Self::load) followed by [`WidgetRegistry::reconcile`], so every
    /// catalog id is present.
    pub fn load_reconciled(&self) -> LayoutConfiguration {
        self.registry.reconcile(&self.load())
    }

    /// Persists `config` verbatim, replacing whatever was stored.
    pub fn save(&self, config: &LayoutConfiguration) -> Result<(), LayoutError> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| LayoutError::Serialize(e.to_string()))?;
        self.backend.set(&self.key, &json).map_err(|e| {
            tracing::warn!("failed to save layout '{}': {}", self.key, e);
            LayoutError::from(e)
        })?;
        tracing::info!("saved layout '{}' ({} widgets)", self.key, config.len());
        Ok(())
    }

    /// Discards all customization: saves and returns registry defaults.
    pub fn reset(&self) -> Result<LayoutConfiguration, LayoutError> {
        let defaults = self.registry.defaults();
        self.save(&defaults)?;
        tracing::info!("reset layout '{}' to defaults", self.key);
        Ok(defaults)
    }

    /// Removes the stored configuration; the next load returns defaults.
    pub fn clear(&self) -> Result<(), LayoutError> {
        self.backend.remove(&self.key)?;
        Ok(())
    }
}

/// Parses a stored payload, filling absent fields from the registry.
fn decode(raw: &str, registry: &WidgetRegistry) -> Result<LayoutConfiguration, serde_json::Error> {
    let records: Vec<StoredDescriptor> = serde_json::from_str(raw)?;

    let mut seen = HashSet::new();
    let mut widgets = Vec::with_capacity(records.len());
    let mut unranked = Vec::new();

    for record in records {
        if !seen.insert(record.id.clone()) {
            tracing::warn!("dropping duplicate stored widget '{}'", record.id);
            continue;
        }
        let fallback = registry.default_descriptor(&record.id);
        let title = record
            .title
            .or_else(|| fallback.as_ref().map(|d| d.title.clone()))
            .unwrap_or_else(|| record.id.clone());
        let order = record.order.or_else(|| fallback.as_ref().map(|d| d.order));
        if order.is_none() {
            unranked.push(widgets.len());
        }
        widgets.push(WidgetDescriptor {
            id: record.id,
            title,
            visible: record.visible.unwrap_or(true),
            order: order.unwrap_or(0),
        });
    }

    let mut next = widgets.iter().map(|w| w.order).max().unwrap_or(0);
    for index in unranked {
        next = next.saturating_add(1);
        widgets[index].order = next;
    }

    Ok(LayoutConfiguration::new(widgets))
}
