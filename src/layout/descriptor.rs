//! Widget descriptor and layout configuration types.
//!
//! A [`LayoutConfiguration`] serializes as a bare JSON array of
//! `{id, title, visible, order}` records; that array is the persisted
//! format under the layout key.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Identity and presentation metadata for one dashboard panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetDescriptor {
    /// Stable identifier, unique within a configuration.
    pub id: String,
    /// Display label. Not used for identity.
    pub title: String,
    /// Whether the panel renders.
    pub visible: bool,
    /// Sort rank. By convention unique and contiguous from 1.
    pub order: u32,
}

impl WidgetDescriptor {
    /// Creates a visible descriptor.
    pub fn new(id: impl Into<String>, title: impl Into<String>, order: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            visible: true,
            order,
        }
    }

    /// Returns the descriptor with `visible` set.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Ordered collection of widget descriptors, one per known widget id.
///
/// The collection order is the order the descriptors were stored in; it is
/// not necessarily sorted by `order`. Use
/// [`render_order`](crate::layout::render_order) to get display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutConfiguration {
    widgets: Vec<WidgetDescriptor>,
}

impl LayoutConfiguration {
    /// Wraps the given descriptors without reordering them.
    pub fn new(widgets: Vec<WidgetDescriptor>) -> Self {
        Self { widgets }
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns `true` if the configuration holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Descriptors in collection order.
    pub fn descriptors(&self) -> &[WidgetDescriptor] {
        &self.widgets
    }

    /// Iterates descriptors in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, WidgetDescriptor> {
        self.widgets.iter()
    }

    /// Looks up the descriptor for `id`.
    pub fn get(&self, id: &str) -> Option<&WidgetDescriptor> {
        self.widgets.iter().find(|w| w.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut WidgetDescriptor> {
        self.widgets.iter_mut().find(|w| w.id == id)
    }

    /// Returns `true` if a descriptor with `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Ids in collection order.
    pub fn ids(&self) -> Vec<&str> {
        self.widgets.iter().map(|w| w.id.as_str()).collect()
    }

    /// Highest `order` value, if any.
    pub fn max_order(&self) -> Option<u32> {
        self.widgets.iter().map(|w| w.order).max()
    }

    /// `true` if no two descriptors share an id.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::new();
        self.widgets.iter().all(|w| seen.insert(w.id.as_str()))
    }

    /// `true` if no two descriptors share an `order` value.
    pub fn has_unique_orders(&self) -> bool {
        let mut seen = HashSet::new();
        self.widgets.iter().all(|w| seen.insert(w.order))
    }

    /// `true` if the `order` values are exactly `1..=len` in some order.
    pub fn has_contiguous_orders(&self) -> bool {
        let mut orders: Vec<u32> = self.widgets.iter().map(|w| w.order).collect();
        orders.sort_unstable();
        orders.iter().copied().eq(1..=self.widgets.len() as u32)
    }

    pub(crate) fn push(&mut self, descriptor: WidgetDescriptor) {
        self.widgets.push(descriptor);
    }

    pub(crate) fn as_mut_vec(&mut self) -> &mut Vec<WidgetDescriptor> {
        &mut self.widgets
    }

    /// Consumes the configuration, returning its descriptors.
    pub fn into_descriptors(self) -> Vec<WidgetDescriptor> {
        self.widgets
    }
}

impl From<Vec<WidgetDescriptor>> for LayoutConfiguration {
    fn from(widgets: Vec<WidgetDescriptor>) -> Self {
        Self::new(widgets)
    }
}

impl FromIterator<WidgetDescriptor> for LayoutConfiguration {
    fn from_iter<I: IntoIterator<Item = WidgetDescriptor>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LayoutConfiguration {
    type Item = &'a WidgetDescriptor;
    type IntoIter = std::slice::Iter<'a, WidgetDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.widgets.iter()
    }
}
