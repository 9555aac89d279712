use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, FormField};
use crate::util::unicode;

/// Entry form over a draft or an existing pin. Title and description are
/// single-line fields; Tab/Up/Down moves focus, Enter submits, Esc cancels.
pub(super) fn handle_form(app: &mut App, key: KeyEvent) {
    let Some(form) = &mut app.form else {
        app.mode = crate::tui::app::Mode::Navigate;
        return;
    };

    match (key.modifiers, key.code) {
        (KeyModifiers::NONE, KeyCode::Enter) => {
            app.submit_form();
        }
        (KeyModifiers::NONE, KeyCode::Esc) => {
            app.cancel_modal();
        }

        // Field focus
        (KeyModifiers::NONE, KeyCode::Tab)
        | (KeyModifiers::SHIFT, KeyCode::BackTab)
        | (_, KeyCode::Up)
        | (_, KeyCode::Down) => {
            form.field = match form.field {
                FormField::Title => FormField::Description,
                FormField::Description => FormField::Title,
            };
            form.cursor = form.focused_text().len();
        }

        // Cursor movement within the focused field
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(form.focused_text(), form.cursor) {
                form.cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(form.focused_text(), form.cursor) {
                form.cursor = next;
            }
        }
        (_, KeyCode::Home) => {
            form.cursor = 0;
        }
        (_, KeyCode::End) => {
            form.cursor = form.focused_text().len();
        }

        (KeyModifiers::NONE, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(form.focused_text(), form.cursor) {
                let cursor = form.cursor;
                form.focused_text_mut().replace_range(prev..cursor, "");
                form.cursor = prev;
                form.error = None;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(form.focused_text(), form.cursor) {
                let cursor = form.cursor;
                form.focused_text_mut().replace_range(cursor..next, "");
                form.error = None;
            }
        }

        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            let cursor = form.cursor;
            form.focused_text_mut().insert(cursor, c);
            form.cursor += c.len_utf8();
            form.error = None;
        }

        _ => {}
    }
}
