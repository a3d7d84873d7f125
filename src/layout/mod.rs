//! Dashboard widget layout engine.
//!
//! - [`descriptor`]: `WidgetDescriptor` and `LayoutConfiguration`
//! - [`store`]: persisted layout (load / save / reset)
//! - [`editor`]: working-copy edit sessions committed on save
//! - [`render`]: read-only visibility and ordering for the dashboard
//!
//! Defaults come from [`crate::widgets::WidgetRegistry`].

pub mod descriptor;
pub mod editor;
pub mod error;
pub mod render;
pub mod store;

pub use descriptor::{LayoutConfiguration, WidgetDescriptor};
pub use editor::{EditSession, LayoutEditor};
pub use error::{CommitError, LayoutError};
pub use render::{is_visible, render_order, DashboardRenderer, DashboardView, PanelSlot};
pub use store::{LayoutStore, DEFAULT_LAYOUT_KEY};
