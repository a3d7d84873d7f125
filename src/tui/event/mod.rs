//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for periodic UI refresh.

use crate::storage::KeyValueStore;
use crate::tui::app::{App, Screen};
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::io;
use std::time::Duration;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// No input arrived within one tick.
    Tick,
}

/// Event source that polls crossterm with a tick timeout.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Blocks until a terminal event arrives or one tick elapses.
    pub fn next(&self) -> io::Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }
        match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
            // Key releases, mouse, focus, paste
            _ => Ok(Event::Tick),
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Leave the dashboard for the settings screen.
    OpenSettings,
    /// Re-mount the dashboard from storage.
    Reload,
    /// Commit the edit session.
    Save,
    /// Discard the edit session.
    Cancel,
}

/// Returns true for keys that quit from any screen.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Handles a key event by dispatching to the appropriate app method or action.
///
/// Edits on the settings screen are applied directly to the session; anything
/// that touches storage or switches screens is returned as an [`Action`].
pub fn handle_key_event<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Action {
    if should_quit(key) {
        return Action::Quit;
    }
    match app.screen {
        Screen::Dashboard => handle_dashboard_key(key),
        Screen::Settings => handle_settings_key(app, key),
    }
}

fn handle_dashboard_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('s') => Action::OpenSettings,
        KeyCode::Char('r') => Action::Reload,
        _ => Action::None,
    }
}

fn handle_settings_key<S: KeyValueStore>(app: &mut App<S>, key: KeyEvent) -> Action {
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Up if shift => app.move_selected_up(),
        KeyCode::Down if shift => app.move_selected_down(),
        KeyCode::Char('K') => app.move_selected_up(),
        KeyCode::Char('J') => app.move_selected_down(),
        KeyCode::Char('k') | KeyCode::Up => app.select_previous(),
        KeyCode::Char('j') | KeyCode::Down => app.select_next(),
        KeyCode::Char(' ') => app.toggle_selected(),
        KeyCode::Char('R') => app.reset_selected_layout(),
        KeyCode::Enter => return Action::Save,
        KeyCode::Esc => return Action::Cancel,
        _ => {}
    }
    Action::None
}

#[cfg(test)]
mod tests;
