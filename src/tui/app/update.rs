use super::*;

impl<S: KeyValueStore> App<S> {
    /// Opens the settings screen on a fresh edit session.
    pub fn open_settings(&mut self) {
        self.session = Some(self.editor.open(&self.store));
        self.cursor = 0;
        self.screen = Screen::Settings;
    }

    /// Moves the settings cursor down one row.
    pub fn select_next(&mut self) {
        let len = self.session.as_ref().map_or(0, EditSession::len);
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    /// Moves the settings cursor up one row.
    pub fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Flips visibility of the widget under the cursor.
    pub fn toggle_selected(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(id) = session.get(self.cursor).map(|w| w.id.clone()) else {
            return;
        };
        session.toggle_visibility(&id);
    }

    /// Moves the widget under the cursor one slot earlier; the cursor follows it.
    pub fn move_selected_up(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if self.cursor > 0 && session.move_up(self.cursor).is_ok() {
            self.cursor -= 1;
        }
    }

    /// Moves the widget under the cursor one slot later; the cursor follows it.
    pub fn move_selected_down(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if self.cursor + 1 < session.len() && session.move_down(self.cursor).is_ok() {
            self.cursor += 1;
        }
    }

    /// Replaces the working copy with catalog defaults. Nothing is saved.
    pub fn reset_selected_layout(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.reset_working();
            self.cursor = self.cursor.min(session.len().saturating_sub(1));
            self.set_status("Restored defaults. Press Enter to save.");
        }
    }

    /// Commits the session and returns to a freshly mounted dashboard.
    ///
    /// A failed save keeps the settings screen open with the working copy
    /// intact so the user can retry or cancel.
    pub(super) fn save(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        match session.commit(&self.store) {
            Ok(_) => {
                self.mount_dashboard();
                self.set_status("Layout saved");
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.set_status(format!(
                    "Save failed: {}. Enter to retry, Esc to cancel",
                    err.error()
                ));
                self.session = Some(err.into_session());
            }
        }
    }

    /// Discards the session and returns to the dashboard.
    pub(super) fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            session.discard();
        }
        self.mount_dashboard();
    }
}
