//! Main rendering orchestration for the TUI.
//!
//! Provides the top-level `render` function that composes the header, the
//! active screen (dashboard grid or settings list), and the footer.

use crate::layout::{DashboardView, EditSession, PanelSlot};
use crate::storage::KeyValueStore;
use crate::tui::app::{App, Screen};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, List, ListItem, ListState, Paragraph},
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of every screen.
const HEADER_TEXT: &str = "Factory Dashboard";

/// Version string shown in the header (right-aligned).
const VERSION_TEXT: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// Footer keybindings on the dashboard.
const DASHBOARD_HINTS: &str = "[s] Settings  [r] Reload  [q] Quit";

/// Footer keybindings on the settings screen.
const SETTINGS_HINTS: &str =
    "[j/k] Select  [Space] Show/hide  [K/J] Move  [R] Defaults  [Enter] Save  [Esc] Cancel";

/// Shown instead of the grid when every widget is hidden.
const EMPTY_DASHBOARD_TEXT: &str = "All widgets are hidden. Press [s] to choose widgets.";

/// Renders the full screen: header, active screen body, footer.
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(3),    // body
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app.screen);

    match (app.screen, app.session.as_ref()) {
        (Screen::Settings, Some(session)) => {
            render_settings(frame, chunks[1], session, app.cursor)
        }
        _ => render_panels(frame, chunks[1], &app.view, app.columns),
    }

    let footer = match &app.status_message {
        Some((msg, expiry)) if Instant::now() < *expiry => Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(Color::Yellow),
        )),
        _ => footer_hints(app),
    };
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}

fn render_header(frame: &mut Frame, area: Rect, screen: Screen) {
    let title = match screen {
        Screen::Dashboard => HEADER_TEXT.to_string(),
        Screen::Settings => format!("{HEADER_TEXT} / Widgets"),
    };
    let padding_len = (area.width as usize)
        .saturating_sub(title.len())
        .saturating_sub(VERSION_TEXT.len());
    let header = Paragraph::new(Line::from(vec![
        Span::styled(title, Style::default().fg(Color::Cyan)),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(VERSION_TEXT, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

fn footer_hints<S: KeyValueStore>(app: &App<S>) -> Line<'static> {
    let style = Style::default().fg(Color::DarkGray);
    match app.screen {
        Screen::Settings => Line::from(Span::styled(SETTINGS_HINTS, style)),
        Screen::Dashboard if app.view.hidden.is_empty() => {
            Line::from(Span::styled(DASHBOARD_HINTS, style))
        }
        Screen::Dashboard => Line::from(vec![
            Span::styled(DASHBOARD_HINTS, style),
            Span::styled(format!("  ({} hidden)", app.view.hidden.len()), style),
        ]),
    }
}

/// Splits `area` into `count` cells, filled row by row, `columns` per row.
pub fn panel_grid(area: Rect, count: usize, columns: u16) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let columns = usize::from(columns.max(1)).min(count);
    let rows = count.div_ceil(columns);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    row_areas
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
                .split(*row)
                .to_vec()
        })
        .take(count)
        .collect()
}

fn render_panels(frame: &mut Frame, area: Rect, view: &DashboardView, columns: u16) {
    if view.panels.is_empty() {
        let empty = Paragraph::new(EMPTY_DASHBOARD_TEXT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let cells = panel_grid(area, view.panels.len(), columns);
    for (slot, cell) in view.panels.iter().zip(cells) {
        render_panel(frame, cell, slot);
    }
}

fn render_panel(frame: &mut Frame, area: Rect, slot: &PanelSlot) {
    let block = Block::bordered()
        .title(format!(" {} ", slot.title))
        .border_style(Style::default().fg(Color::Gray));
    // Widget bodies are supplied by the host application.
    let body = Paragraph::new(Line::from(Span::styled(
        slot.id.clone(),
        Style::default().fg(Color::DarkGray),
    )))
    .block(block);
    frame.render_widget(body, area);
}

fn render_settings(frame: &mut Frame, area: Rect, session: &EditSession, cursor: usize) {
    let items: Vec<ListItem> = session
        .working()
        .iter()
        .map(|w| {
            let (mark, style) = if w.visible {
                ("[x] ", Style::default())
            } else {
                ("[ ] ", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(w.title.clone(), style),
                Span::styled(format!("  {}", w.id), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let title = if session.is_dirty() {
        " Widgets (unsaved) "
    } else {
        " Widgets "
    };
    let list = List::new(items)
        .block(Block::bordered().title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutStore;
    use crate::storage::MemoryStore;
    use crate::tui::test_utils::{find_row_with_text, render_app_to_buffer, row_text};
    use crate::widgets::WidgetRegistry;

    fn make_app(columns: u16) -> App<MemoryStore> {
        App::new(
            LayoutStore::new(MemoryStore::new(), WidgetRegistry::new()),
            columns,
        )
    }

    #[test]
    fn test_panel_grid_fills_rows_first() {
        let cells = panel_grid(Rect::new(0, 0, 80, 20), 5, 2);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[0].y, cells[1].y);
        assert!(cells[0].x < cells[1].x);
        assert!(cells[2].y > cells[0].y);
        assert_eq!(cells[4].x, cells[0].x);
    }

    #[test]
    fn test_panel_grid_fewer_panels_than_columns() {
        let cells = panel_grid(Rect::new(0, 0, 90, 10), 2, 4);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].width + cells[1].width, 90);
    }

    #[test]
    fn test_panel_grid_empty() {
        assert!(panel_grid(Rect::new(0, 0, 80, 20), 0, 2).is_empty());
    }

    #[test]
    fn test_header_shows_title_and_version() {
        let app = make_app(2);
        let buffer = render_app_to_buffer(&app, 100, 30);
        let header = row_text(&buffer, 0);
        assert!(header.contains("Factory Dashboard"));
        assert!(header.contains(VERSION_TEXT));
    }

    #[test]
    fn test_dashboard_renders_every_visible_title() {
        let app = make_app(2);
        let buffer = render_app_to_buffer(&app, 100, 30);
        for title in ["Inventory Overview", "Low Stock Alerts", "Quick Actions"] {
            assert!(
                find_row_with_text(&buffer, title).is_some(),
                "missing panel {title}"
            );
        }
    }

    #[test]
    fn test_dashboard_follows_saved_order_and_visibility() {
        let mut app = make_app(1);
        app.open_settings();
        app.toggle_selected(); // hide inventory_overview
        app.select_next();
        app.select_next();
        app.move_selected_up(); // pending_requisitions before low_stock
        app.apply(crate::tui::event::Action::Save);

        let buffer = render_app_to_buffer(&app, 60, 40);
        assert!(find_row_with_text(&buffer, "Inventory Overview").is_none());
        let pending = find_row_with_text(&buffer, "Pending Requisitions").expect("pending shown");
        let low = find_row_with_text(&buffer, "Low Stock Alerts").expect("low stock shown");
        assert!(pending < low, "pending ({pending}) should be above low stock ({low})");
    }

    #[test]
    fn test_dashboard_all_hidden_shows_hint() {
        let mut app = make_app(2);
        app.open_settings();
        for _ in 0..8 {
            app.toggle_selected();
            app.select_next();
        }
        app.apply(crate::tui::event::Action::Save);

        let buffer = render_app_to_buffer(&app, 80, 20);
        assert!(find_row_with_text(&buffer, "All widgets are hidden").is_some());
    }

    #[test]
    fn test_settings_shows_checkboxes() {
        let mut app = make_app(2);
        app.open_settings();
        app.select_next();
        app.toggle_selected();

        let buffer = render_app_to_buffer(&app, 100, 20);
        let low = find_row_with_text(&buffer, "Low Stock Alerts").expect("row present");
        assert!(row_text(&buffer, low).contains("[ ] Low Stock Alerts"));
        let inv = find_row_with_text(&buffer, "Inventory Overview").expect("row present");
        assert!(row_text(&buffer, inv).contains("[x] Inventory Overview"));
        assert!(find_row_with_text(&buffer, "(unsaved)").is_some());
    }

    #[test]
    fn test_settings_footer_lists_keys() {
        let mut app = make_app(2);
        app.open_settings();
        let buffer = render_app_to_buffer(&app, 100, 20);
        let footer = row_text(&buffer, 19);
        assert!(footer.contains("[Enter] Save"), "footer: {footer}");
    }

    #[test]
    fn test_status_message_replaces_footer() {
        let mut app = make_app(2);
        app.set_status("Layout saved");
        let buffer = render_app_to_buffer(&app, 80, 20);
        assert!(row_text(&buffer, 19).contains("Layout saved"));
    }
}
