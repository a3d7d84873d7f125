//! Layout editing sessions.
//!
//! An [`EditSession`] holds a working copy of the layout. Edits (toggle,
//! move up/down, reset) only touch the working copy; nothing reaches storage
//! until [`EditSession::commit`]. Dropping or [`discard`](EditSession::discard)ing
//! a session leaves persisted state untouched.
//!
//! Within a session, position in the working copy is the source of truth for
//! ordering. [`begin`](LayoutEditor::begin) sorts the snapshot by `order`
//! (stable) and renumbers it `1..=N`; every move then swaps both the two
//! descriptors and their `order` values, so the numbering stays contiguous.

use crate::layout::{CommitError, LayoutConfiguration, LayoutError, LayoutStore, WidgetDescriptor};
use crate::storage::KeyValueStore;
use crate::widgets::WidgetRegistry;

/// Opens edit sessions against a registry's defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEditor {
    registry: WidgetRegistry,
}

impl LayoutEditor {
    /// Creates an editor whose resets use `registry` defaults.
    pub fn new(registry: WidgetRegistry) -> Self {
        Self { registry }
    }

    /// Snapshots `initial` into a new session.
    pub fn begin(&self, initial: &LayoutConfiguration) -> EditSession {
        EditSession::begin(initial, self.registry)
    }

    /// Loads the committed layout from `store` (with missing catalog widgets
    /// filled in) and begins a session on it.
    pub fn open<S: KeyValueStore>(&self, store: &LayoutStore<S>) -> EditSession {
        self.begin(&store.load_reconciled())
    }
}

/// An uncommitted working copy of a layout.
#[derive(Debug, Clone)]
pub struct EditSession {
    working: LayoutConfiguration,
    snapshot: LayoutConfiguration,
    registry: WidgetRegistry,
}

impl EditSession {
    /// Snapshots `initial`, ordered by ascending `order`.
    pub fn begin(initial: &LayoutConfiguration, registry: WidgetRegistry) -> Self {
        let mut working = initial.clone();
        normalize(&mut working);
        tracing::debug!("began layout edit session ({} widgets)", working.len());
        Self {
            snapshot: working.clone(),
            working,
            registry,
        }
    }

    /// The current working copy, in display order.
    pub fn working(&self) -> &LayoutConfiguration {
        &self.working
    }

    /// Number of widgets in the working copy.
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// Returns `true` if the working copy is empty.
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Descriptor at `index` in the working copy.
    pub fn get(&self, index: usize) -> Option<&WidgetDescriptor> {
        self.working.descriptors().get(index)
    }

    /// Position of `id` in the working copy.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.working.iter().position(|w| w.id == id)
    }

    /// `true` if the working copy differs from the snapshot taken at begin.
    pub fn is_dirty(&self) -> bool {
        self.working != self.snapshot
    }

    /// Flips the visibility of `id`. Unknown ids are ignored.
    ///
    /// Returns whether `id` was found.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        match self.working.get_mut(id) {
            Some(widget) => {
                widget.visible = !widget.visible;
                tracing::debug!("toggled '{}' visible={}", id, widget.visible);
                true
            }
            None => {
                tracing::debug!("ignoring toggle of unknown widget '{}'", id);
                false
            }
        }
    }

    /// Swaps the widget at `index` with the one before it.
    ///
    /// No-op at index 0. Fails if `index` is outside the working copy.
    pub fn move_up(&mut self, index: usize) -> Result<(), LayoutError> {
        self.check_index(index)?;
        if index > 0 {
            self.swap_adjacent(index - 1);
        }
        Ok(())
    }

    /// Swaps the widget at `index` with the one after it.
    ///
    /// No-op at the last index. Fails if `index` is outside the working copy.
    pub fn move_down(&mut self, index: usize) -> Result<(), LayoutError> {
        self.check_index(index)?;
        if index + 1 < self.working.len() {
            self.swap_adjacent(index);
        }
        Ok(())
    }

    /// Replaces the working copy with registry defaults. Storage is not
    /// touched until commit.
    pub fn reset_working(&mut self) {
        self.working = self.registry.defaults();
        tracing::debug!("reset working layout to defaults");
    }

    /// Saves the working copy and ends the session.
    ///
    /// On failure the session is returned inside the error with its working
    /// copy intact; persisted state is whatever it was before the attempt.
    pub fn commit<S: KeyValueStore>(
        self,
        store: &LayoutStore<S>,
    ) -> Result<LayoutConfiguration, CommitError> {
        match store.save(&self.working) {
            Ok(()) => Ok(self.working),
            Err(e) => Err(CommitError::new(self, e)),
        }
    }

    /// Ends the session without saving.
    pub fn discard(self) {
        if self.is_dirty() {
            tracing::debug!("discarded layout edits");
        }
    }

    fn check_index(&self, index: usize) -> Result<(), LayoutError> {
        let len = self.working.len();
        if index < len {
            Ok(())
        } else {
            Err(LayoutError::IndexOutOfRange { index, len })
        }
    }

    /// Swaps positions `upper` and `upper + 1` together with their ranks.
    fn swap_adjacent(&mut self, upper: usize) {
        let widgets = self.working.as_mut_vec();
        let (head, tail) = widgets.split_at_mut(upper + 1);
        std::mem::swap(&mut head[upper].order, &mut tail[0].order);
        widgets.swap(upper, upper + 1);
        tracing::debug!(
            "moved '{}' above '{}'",
            widgets[upper].id,
            widgets[upper + 1].id
        );
    }
}

/// Stable-sorts by `order` and renumbers ranks `1..=N` from position.
fn normalize(config: &mut LayoutConfiguration) {
    let widgets = config.as_mut_vec();
    widgets.sort_by_key(|w| w.order);
    for (i, widget) in widgets.iter_mut().enumerate() {
        widget.order = i as u32 + 1;
    }
}
