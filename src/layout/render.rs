//! Read-only consumption of a committed layout by the dashboard.
//!
//! The dashboard never mutates configuration. On every mount it reloads the
//! committed layout, asks [`is_visible`] for each catalog widget, and orders
//! the visible set with [`render_order`]. Nothing is cached between mounts,
//! so edits committed from the settings editor show up on the next visit.

use crate::layout::{LayoutConfiguration, LayoutStore};
use crate::storage::KeyValueStore;
use crate::widgets::WidgetRegistry;
use serde::Serialize;

/// Whether the panel for `id` should render.
///
/// Missing ids are visible: a widget shipped after the user last saved must
/// not silently disappear.
pub fn is_visible(config: &LayoutConfiguration, id: &str) -> bool {
    config.get(id).map_or(true, |w| w.visible)
}

/// All ids in `config`, ascending by `order`.
///
/// Ties keep their collection position (stable sort).
pub fn render_order(config: &LayoutConfiguration) -> Vec<&str> {
    let mut widgets: Vec<_> = config.iter().collect();
    widgets.sort_by_key(|w| w.order);
    widgets.into_iter().map(|w| w.id.as_str()).collect()
}

/// One panel placed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSlot {
    /// Widget id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// 1-based position among visible panels.
    pub rank: usize,
}

/// What the dashboard shows after a mount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Visible panels in display order.
    pub panels: Vec<PanelSlot>,
    /// Catalog widgets the user has hidden, in display order.
    pub hidden: Vec<String>,
}

impl DashboardView {
    /// Ids of the visible panels, in display order.
    pub fn panel_ids(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.id.as_str()).collect()
    }
}

/// Derives a [`DashboardView`] from a committed layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardRenderer {
    registry: WidgetRegistry,
}

impl DashboardRenderer {
    /// Creates a renderer that shows the widgets in `registry`.
    pub fn new(registry: WidgetRegistry) -> Self {
        Self { registry }
    }

    /// Loads the committed layout from `store` and lays it out.
    pub fn mount<S: KeyValueStore>(&self, store: &LayoutStore<S>) -> DashboardView {
        self.layout(&store.load())
    }

    /// Lays out `config`.
    ///
    /// Catalog widgets missing from `config` are placed by their
    /// registry-default order; ids unknown to the catalog are not rendered.
    pub fn layout(&self, config: &LayoutConfiguration) -> DashboardView {
        let merged = self.registry.reconcile(config);
        let mut view = DashboardView::default();
        for id in render_order(&merged) {
            if !self.registry.contains(id) {
                continue;
            }
            if is_visible(&merged, id) {
                let title = merged
                    .get(id)
                    .map(|w| w.title.clone())
                    .unwrap_or_else(|| id.to_string());
                view.panels.push(PanelSlot {
                    id: id.to_string(),
                    title,
                    rank: view.panels.len() + 1,
                });
            } else {
                view.hidden.push(id.to_string());
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::WidgetDescriptor;
    use crate::storage::MemoryStore;

    fn descriptor(id: &str, order: u32) -> WidgetDescriptor {
        WidgetDescriptor::new(id, id.to_uppercase(), order)
    }

    // -- is_visible --

    #[test]
    fn is_visible_reads_flag() {
        let config = LayoutConfiguration::new(vec![
            descriptor("a", 1),
            descriptor("b", 2).with_visible(false),
        ]);
        assert!(is_visible(&config, "a"));
        assert!(!is_visible(&config, "b"));
    }

    #[test]
    fn is_visible_fails_open_for_missing_id() {
        assert!(is_visible(&LayoutConfiguration::default(), "anything"));
    }

    // -- render_order --

    #[test]
    fn render_order_sorts_ascending() {
        let config = LayoutConfiguration::new(vec![
            descriptor("c", 3),
            descriptor("a", 1),
            descriptor("b", 2),
        ]);
        assert_eq!(render_order(&config), vec!["a", "b", "c"]);
    }

    #[test]
    fn render_order_breaks_ties_by_position() {
        let config = LayoutConfiguration::new(vec![
            descriptor("late", 5),
            descriptor("first_tie", 2),
            descriptor("second_tie", 2),
            descriptor("early", 1),
        ]);
        assert_eq!(
            render_order(&config),
            vec!["early", "first_tie", "second_tie", "late"]
        );
    }

    #[test]
    fn render_order_is_permutation_of_ids() {
        let config = LayoutConfiguration::new(vec![
            descriptor("x", 9),
            descriptor("y", 0),
            descriptor("z", 9),
            descriptor("w", 4),
        ]);
        let mut ordered = render_order(&config);
        assert_eq!(ordered.len(), config.len());
        ordered.sort_unstable();
        let mut ids = config.ids();
        ids.sort_unstable();
        assert_eq!(ordered, ids);
    }

    #[test]
    fn render_order_includes_hidden_widgets() {
        let config = LayoutConfiguration::new(vec![descriptor("a", 1).with_visible(false)]);
        assert_eq!(render_order(&config), vec!["a"]);
    }

    // -- DashboardRenderer --

    #[test]
    fn defaults_show_every_widget_in_catalog_order() {
        let registry = WidgetRegistry::new();
        let view = DashboardRenderer::new(registry).layout(&registry.defaults());
        assert_eq!(view.panel_ids(), registry.ids().collect::<Vec<_>>());
        assert!(view.hidden.is_empty());
        let ranks: Vec<usize> = view.panels.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, (1..=8).collect::<Vec<usize>>());
    }

    #[test]
    fn hidden_widgets_are_listed_separately() {
        let registry = WidgetRegistry::new();
        let mut config = registry.defaults();
        config.get_mut("low_stock").expect("present").visible = false;
        let view = DashboardRenderer::new(registry).layout(&config);
        assert_eq!(view.panels.len(), 7);
        assert_eq!(view.hidden, vec!["low_stock".to_string()]);
        assert_eq!(view.panels[1].id, "pending_requisitions");
        assert_eq!(view.panels[1].rank, 2);
    }

    #[test]
    fn unknown_ids_are_not_rendered() {
        let registry = WidgetRegistry::new();
        let mut config = registry.defaults();
        config.push(descriptor("retired_widget", 0));
        let view = DashboardRenderer::new(registry).layout(&config);
        assert!(!view.panel_ids().contains(&"retired_widget"));
        assert_eq!(view.panels.len(), 8);
    }

    #[test]
    fn empty_config_degrades_to_everything() {
        let registry = WidgetRegistry::new();
        let view = DashboardRenderer::new(registry).layout(&LayoutConfiguration::default());
        assert_eq!(view.panel_ids(), registry.ids().collect::<Vec<_>>());
    }

    #[test]
    fn persisted_subset_keeps_new_widgets_visible() {
        // Saved before `backup_status` and `quick_actions` shipped.
        let registry = WidgetRegistry::new();
        let saved: LayoutConfiguration = registry
            .defaults()
            .into_descriptors()
            .into_iter()
            .filter(|w| w.id != "backup_status" && w.id != "quick_actions")
            .collect();
        assert_eq!(saved.len(), 6);

        for id in ["backup_status", "quick_actions"] {
            assert!(is_visible(&saved, id), "{id} must fail open");
        }

        let view = DashboardRenderer::new(registry).layout(&saved);
        assert_eq!(view.panels.len(), 8);
        // Registry defaults rank them 7 and 8, after the six saved widgets.
        assert_eq!(
            &view.panel_ids()[6..],
            &["backup_status", "quick_actions"]
        );
    }

    #[test]
    fn missing_widget_interleaves_by_default_order() {
        // `low_stock` (default order 2) is missing; saved widgets keep their
        // own orders 1 and 3..=8, so it slots into position 2.
        let registry = WidgetRegistry::new();
        let saved: LayoutConfiguration = registry
            .defaults()
            .into_descriptors()
            .into_iter()
            .filter(|w| w.id != "low_stock")
            .collect();
        let view = DashboardRenderer::new(registry).layout(&saved);
        assert_eq!(view.panels[1].id, "low_stock");
    }

    #[test]
    fn missing_widget_ties_go_after_saved_widget() {
        // A saved widget already holds order 2; the reconciled `low_stock`
        // also gets 2 and, being appended, renders after it.
        let registry = WidgetRegistry::new();
        let saved = LayoutConfiguration::new(vec![
            WidgetDescriptor::new("inventory_overview", "Inventory Overview", 1),
            WidgetDescriptor::new("quick_actions", "Quick Actions", 2),
        ]);
        let view = DashboardRenderer::new(registry).layout(&saved);
        assert_eq!(
            &view.panel_ids()[..3],
            &["inventory_overview", "quick_actions", "low_stock"]
        );
    }

    #[test]
    fn mount_rereads_store_every_time() {
        let registry = WidgetRegistry::new();
        let store = LayoutStore::new(MemoryStore::new(), registry);
        let renderer = DashboardRenderer::new(registry);
        assert_eq!(renderer.mount(&store).panels.len(), 8);

        let mut config = registry.defaults();
        config.get_mut("recent_activity").expect("present").visible = false;
        store.save(&config).expect("save");

        let view = renderer.mount(&store);
        assert_eq!(view.panels.len(), 7);
        assert_eq!(view.hidden, vec!["recent_activity".to_string()]);
    }

    #[test]
    fn view_serializes_to_json() {
        let registry = WidgetRegistry::new();
        let view = DashboardRenderer::new(registry).layout(&registry.defaults());
        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["panels"][0]["id"], "inventory_overview");
        assert_eq!(json["panels"][0]["rank"], 1);
        assert!(json["hidden"].as_array().expect("array").is_empty());
    }
}
