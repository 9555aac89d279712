use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

/// Incremental sidebar filter. The query narrows the visible rows while it
/// is typed; Enter keeps it applied, Esc drops it.
pub(super) fn handle_search(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Enter) => {
            app.filter = if app.search_input.is_empty() {
                None
            } else {
                Some(app.search_input.clone())
            };
            app.mode = Mode::Navigate;
        }
        (KeyModifiers::NONE, KeyCode::Esc) => {
            app.search_input.clear();
            app.filter = None;
            app.mode = Mode::Navigate;
        }
        (KeyModifiers::NONE, KeyCode::Backspace) => {
            app.search_input.pop();
        }
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.search_input.push(c);
        }
        _ => {}
    }
}
