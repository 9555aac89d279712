use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode};

pub(super) fn handle_info(app: &mut App, key: KeyEvent) {
    let Mode::Info { pin_id } = app.mode.clone() else {
        return;
    };

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Esc)
        | (KeyModifiers::NONE, KeyCode::Char('q'))
        | (KeyModifiers::NONE, KeyCode::Enter) => {
            app.cancel_modal();
        }
        (KeyModifiers::NONE, KeyCode::Char('e')) => {
            app.open_edit(pin_id);
        }
        (KeyModifiers::NONE, KeyCode::Char('x')) | (_, KeyCode::Delete) => {
            app.request_delete(pin_id);
        }
        _ => {}
    }
}
