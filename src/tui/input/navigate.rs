use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::App;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Any keypress dismisses a lingering status message
    if app.status_message.is_some() && !matches!(key.code, KeyCode::Char('q')) {
        app.status_message = None;
    }

    match (key.modifiers, key.code) {
        // Quit
        (KeyModifiers::NONE, KeyCode::Char('q')) => {
            app.should_quit = true;
        }

        // Pan
        (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
            app.map.viewport.pan_cells(-2, 0);
        }
        (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
            app.map.viewport.pan_cells(2, 0);
        }
        (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
            app.map.viewport.pan_cells(0, -1);
        }
        (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
            app.map.viewport.pan_cells(0, 1);
        }

        // Zoom
        (_, KeyCode::Char('+')) | (_, KeyCode::Char('=')) => {
            app.map.viewport.zoom_in();
        }
        (_, KeyCode::Char('-')) => {
            app.map.viewport.zoom_out();
        }

        // Map click at the crosshair: info popup on a marker, draft otherwise
        (KeyModifiers::NONE, KeyCode::Enter) => {
            app.map_click();
        }
        // Always drop a draft, even over an existing marker
        (KeyModifiers::NONE, KeyCode::Char('a')) => {
            app.open_draft_at_center();
        }

        // Cycle the selection through the visible pins
        (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::NONE, KeyCode::Char('n')) => {
            app.cycle_selection(1);
        }
        (KeyModifiers::SHIFT, KeyCode::BackTab) | (KeyModifiers::NONE, KeyCode::Char('p')) => {
            app.cycle_selection(-1);
        }

        // Details of the selected pin
        (KeyModifiers::NONE, KeyCode::Char('o')) => {
            if let Some(id) = app.selected.clone() {
                app.open_info(id);
            }
        }

        // Delete the pin in focus
        (KeyModifiers::NONE, KeyCode::Char('x')) | (_, KeyCode::Delete) => {
            if let Some(id) = app.delete_target() {
                app.request_delete(id);
            }
        }
        (KeyModifiers::SHIFT, KeyCode::Char('C')) => {
            app.request_clear();
        }

        // Search / filter
        (KeyModifiers::NONE, KeyCode::Char('/')) => {
            app.search_input = app.filter.clone().unwrap_or_default();
            app.mode = crate::tui::app::Mode::Search;
        }
        (KeyModifiers::NONE, KeyCode::Esc) => {
            app.filter = None;
            app.selected = None;
        }

        // Jump back to the configured home view
        (KeyModifiers::NONE, KeyCode::Char('g')) => {
            app.go_home();
        }

        (KeyModifiers::NONE, KeyCode::Char('?')) => {
            app.show_help = true;
        }

        _ => {}
    }
}
