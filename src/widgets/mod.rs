//! Widget registry for the factory dashboard.
//!
//! The registry is the single catalog of dashboard panels: their ids,
//! titles, and factory-default order. Both the dashboard and the settings
//! editor take their defaults from here.
//!
//! # Architecture
//!
//! The catalog is a static slice fixed at build time. Adding or removing a
//! widget is a deployment change, never a runtime operation. Persisted
//! layouts are joined to the catalog by widget id; ids the user has never
//! saved (new widgets shipped since) are filled in by
//! [`WidgetRegistry::reconcile`].
//!
//! # Example
//!
//! ```
//! use factory_dashboard::widgets::WidgetRegistry;
//!
//! let registry = WidgetRegistry::new();
//! let defaults = registry.defaults();
//! assert_eq!(defaults.len(), registry.len());
//! assert!(defaults.iter().all(|w| w.visible));
//! assert_eq!(defaults.descriptors()[0].order, 1);
//! ```

use crate::layout::{LayoutConfiguration, WidgetDescriptor};

/// Static metadata for one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetSpec {
    /// Stable widget identifier.
    pub id: &'static str,
    /// Default display title.
    pub title: &'static str,
}

/// Built-in dashboard widgets, in factory-default order.
pub const BUILTIN_WIDGETS: &[WidgetSpec] = &[
    WidgetSpec {
        id: "inventory_overview",
        title: "Inventory Overview",
    },
    WidgetSpec {
        id: "low_stock",
        title: "Low Stock Alerts",
    },
    WidgetSpec {
        id: "pending_requisitions",
        title: "Pending Requisitions",
    },
    WidgetSpec {
        id: "purchase_orders",
        title: "Purchase Orders",
    },
    WidgetSpec {
        id: "production_status",
        title: "Production Status",
    },
    WidgetSpec {
        id: "recent_activity",
        title: "Recent Activity",
    },
    WidgetSpec {
        id: "backup_status",
        title: "Backup Status",
    },
    WidgetSpec {
        id: "quick_actions",
        title: "Quick Actions",
    },
];

/// Catalog of known widgets and their factory defaults.
///
/// Cheap to copy; holds only a reference to a static catalog.
#[derive(Debug, Clone, Copy)]
pub struct WidgetRegistry {
    catalog: &'static [WidgetSpec],
}

impl WidgetRegistry {
    /// Creates a registry over [`BUILTIN_WIDGETS`].
    pub fn new() -> Self {
        Self::with_catalog(BUILTIN_WIDGETS)
    }

    /// Creates a registry over a custom catalog. Ids must be unique.
    pub const fn with_catalog(catalog: &'static [WidgetSpec]) -> Self {
        Self { catalog }
    }

    /// Returns a fresh default configuration: catalog order, ranks `1..=N`,
    /// all visible.
    pub fn defaults(&self) -> LayoutConfiguration {
        self.catalog
            .iter()
            .enumerate()
            .map(|(i, spec)| WidgetDescriptor::new(spec.id, spec.title, i as u32 + 1))
            .collect()
    }

    /// Widget ids in default order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.catalog.iter().map(|spec| spec.id)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Returns `true` if `id` is in the catalog.
    pub fn contains(&self, id: &str) -> bool {
        self.spec(id).is_some()
    }

    /// Catalog entry for `id`.
    pub fn spec(&self, id: &str) -> Option<&'static WidgetSpec> {
        self.catalog.iter().find(|spec| spec.id == id)
    }

    /// Factory-default descriptor for `id`.
    pub fn default_descriptor(&self, id: &str) -> Option<WidgetDescriptor> {
        self.catalog
            .iter()
            .position(|spec| spec.id == id)
            .map(|i| {
                let spec = &self.catalog[i];
                WidgetDescriptor::new(spec.id, spec.title, i as u32 + 1)
            })
    }

    /// Returns `config` with every catalog id it lacks appended, using the
    /// registry-default descriptor for each.
    ///
    /// Existing entries (including ids unknown to the catalog) are kept
    /// verbatim and in place.
    pub fn reconcile(&self, config: &LayoutConfiguration) -> LayoutConfiguration {
        let mut merged = config.clone();
        for (i, spec) in self.catalog.iter().enumerate() {
            if !merged.contains(spec.id) {
                tracing::debug!("widget '{}' missing from layout, using defaults", spec.id);
                merged.push(WidgetDescriptor::new(spec.id, spec.title, i as u32 + 1));
            }
        }
        merged
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}
