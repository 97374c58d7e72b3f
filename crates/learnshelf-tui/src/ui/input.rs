//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, Screen};

/// Handle one key press.
pub fn handle_input(app: &mut App, key: KeyEvent) {
    match app.screen {
        Screen::Library => handle_library_input(app, key),
        Screen::Detail(_) => handle_detail_input(app, key),
    }
}

fn handle_library_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('r') => app.retry(),
        KeyCode::Left | KeyCode::Char('h') => app.move_selection(-1, 0),
        KeyCode::Right | KeyCode::Char('l') => app.move_selection(1, 0),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection(0, -1),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection(0, 1),
        KeyCode::Enter | KeyCode::Char(' ') => app.tap_selected(),
        _ => {}
    }
}

fn handle_detail_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => app.back(),
        KeyCode::Up | KeyCode::Char('k') => app.move_module_selection(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_module_selection(1),
        KeyCode::Char('r') => app.retry(),
        _ => {}
    }
}
