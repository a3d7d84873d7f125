//! Application state and main event loop for the TUI.
//!
//! Manages terminal setup/teardown, panic hooks, and the core render loop.
//! The dashboard screen re-mounts from storage every time it is entered;
//! the settings screen owns an [`EditSession`] for as long as it is open.

mod update;

use crate::layout::{DashboardRenderer, DashboardView, EditSession, LayoutEditor, LayoutStore};
use crate::storage::KeyValueStore;
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::ui::render;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::time::{Duration, Instant};

/// How long footer status messages stay visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Grid of visible widget panels.
    Dashboard,
    /// Widget visibility and order editor.
    Settings,
}

/// Core application state for the TUI.
pub struct App<S> {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Active screen.
    pub screen: Screen,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// Number of panel columns on the dashboard grid.
    pub columns: u16,
    /// Result of the last dashboard mount.
    pub view: DashboardView,
    /// Open edit session while the settings screen is showing.
    pub session: Option<EditSession>,
    /// Highlighted row on the settings screen.
    pub cursor: usize,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    store: LayoutStore<S>,
    renderer: DashboardRenderer,
    editor: LayoutEditor,
}

impl<S: KeyValueStore> App<S> {
    /// Creates the app and mounts the dashboard from `store`.
    pub fn new(store: LayoutStore<S>, columns: u16) -> Self {
        let registry = *store.registry();
        let mut app = Self {
            should_quit: false,
            screen: Screen::Dashboard,
            tick_count: 0,
            columns: columns.max(1),
            view: DashboardView::default(),
            session: None,
            cursor: 0,
            status_message: None,
            store,
            renderer: DashboardRenderer::new(registry),
            editor: LayoutEditor::new(registry),
        };
        app.mount_dashboard();
        app
    }

    /// The layout store backing this app.
    pub fn store(&self) -> &LayoutStore<S> {
        &self.store
    }

    /// Re-reads the committed layout and shows the dashboard.
    pub fn mount_dashboard(&mut self) {
        self.view = self.renderer.mount(&self.store);
        self.screen = Screen::Dashboard;
        tracing::debug!(
            "mounted dashboard: {} visible, {} hidden",
            self.view.panels.len(),
            self.view.hidden.len()
        );
    }

    /// Shows `message` in the footer for a few seconds.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_TTL));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Performs an action returned by the key handler.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::OpenSettings => self.open_settings(),
            Action::Reload => {
                self.mount_dashboard();
                self.set_status("Reloaded layout");
            }
            Action::Save => self.save(),
            Action::Cancel => self.cancel(),
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub fn run(&mut self, tick_rate: Duration) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop(tick_rate);

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    fn event_loop(&mut self, tick_rate: Duration) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(tick_rate);

        terminal.draw(|frame| render(frame, self))?;
        while !self.should_quit {
            match event_handler.next()? {
                Event::Key(key) => {
                    let action = handle_key_event(self, key);
                    self.apply(action);
                }
                Event::Tick => {
                    self.tick_count += 1;
                    self.expire_status_message();
                }
                Event::Resize(_, _) => {}
            }
            terminal.draw(|frame| render(frame, self))?;
        }
        Ok(())
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}
