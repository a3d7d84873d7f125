use super::*;
use crate::layout::LayoutStore;
use crate::storage::MemoryStore;
use crate::widgets::WidgetRegistry;
use crossterm::event::KeyEventState;

fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn press(code: KeyCode) -> KeyEvent {
    make_key(code, KeyModifiers::NONE)
}

fn make_app() -> App<MemoryStore> {
    App::new(LayoutStore::new(MemoryStore::new(), WidgetRegistry::new()), 2)
}

fn settings_app() -> App<MemoryStore> {
    let mut app = make_app();
    app.open_settings();
    app
}

fn working_ids(app: &App<MemoryStore>) -> Vec<String> {
    app.session
        .as_ref()
        .expect("session open")
        .working()
        .iter()
        .map(|w| w.id.clone())
        .collect()
}

#[test]
fn test_should_quit_on_ctrl_c() {
    assert!(should_quit(make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    assert!(!should_quit(press(KeyCode::Char('c'))));
}

#[test]
fn test_event_handler_creation() {
    let handler = EventHandler::new(Duration::from_millis(250));
    assert_eq!(handler.tick_rate, Duration::from_millis(250));
}

#[test]
fn test_dashboard_keys() {
    let mut app = make_app();
    assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('q'))), Action::Quit);
    assert_eq!(
        handle_key_event(&mut app, press(KeyCode::Char('s'))),
        Action::OpenSettings
    );
    assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('r'))), Action::Reload);
    assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('x'))), Action::None);
}

#[test]
fn test_q_does_not_quit_settings() {
    let mut app = settings_app();
    assert_eq!(handle_key_event(&mut app, press(KeyCode::Char('q'))), Action::None);
    assert_eq!(
        handle_key_event(&mut app, make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Action::Quit
    );
}

#[test]
fn test_settings_navigation() {
    let mut app = settings_app();
    handle_key_event(&mut app, press(KeyCode::Char('j')));
    handle_key_event(&mut app, press(KeyCode::Down));
    assert_eq!(app.cursor, 2);
    handle_key_event(&mut app, press(KeyCode::Char('k')));
    assert_eq!(app.cursor, 1);
    handle_key_event(&mut app, press(KeyCode::Up));
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_space_toggles_row_under_cursor() {
    let mut app = settings_app();
    handle_key_event(&mut app, press(KeyCode::Char('j')));
    handle_key_event(&mut app, press(KeyCode::Char(' ')));
    let session = app.session.as_ref().expect("session open");
    assert_eq!(session.get(1).expect("row 1").id, "low_stock");
    assert!(!session.get(1).expect("row 1").visible);
}

#[test]
fn test_shift_k_and_shift_up_move_widget_up() {
    let mut app = settings_app();
    handle_key_event(&mut app, press(KeyCode::Char('j')));
    handle_key_event(&mut app, make_key(KeyCode::Char('K'), KeyModifiers::SHIFT));
    assert_eq!(&working_ids(&app)[..2], &["low_stock", "inventory_overview"]);

    handle_key_event(&mut app, press(KeyCode::Char('j')));
    handle_key_event(&mut app, make_key(KeyCode::Up, KeyModifiers::SHIFT));
    assert_eq!(&working_ids(&app)[..2], &["inventory_overview", "low_stock"]);
    assert_eq!(app.cursor, 0);
}

#[test]
fn test_shift_j_and_shift_down_move_widget_down() {
    let mut app = settings_app();
    handle_key_event(&mut app, make_key(KeyCode::Char('J'), KeyModifiers::SHIFT));
    handle_key_event(&mut app, make_key(KeyCode::Down, KeyModifiers::SHIFT));
    assert_eq!(
        &working_ids(&app)[..3],
        &["low_stock", "pending_requisitions", "inventory_overview"]
    );
    assert_eq!(app.cursor, 2);
}

#[test]
fn test_enter_and_esc_return_actions() {
    let mut app = settings_app();
    assert_eq!(handle_key_event(&mut app, press(KeyCode::Enter)), Action::Save);
    assert_eq!(handle_key_event(&mut app, press(KeyCode::Esc)), Action::Cancel);
}

#[test]
fn test_capital_r_resets_working_copy() {
    let mut app = settings_app();
    handle_key_event(&mut app, press(KeyCode::Char(' ')));
    handle_key_event(&mut app, make_key(KeyCode::Char('R'), KeyModifiers::SHIFT));
    let session = app.session.as_ref().expect("session open");
    assert!(session.working().iter().all(|w| w.visible));
}
