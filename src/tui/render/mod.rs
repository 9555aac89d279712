pub mod form_popup;
pub mod help_overlay;
pub mod info_popup;
pub mod map_view;
pub mod sidebar;
pub mod status_row;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

const SIDEBAR_WIDTH: u16 = 34;

/// Main render function — dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: content | status row (1 row)
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    // Content: map | sidebar
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(SIDEBAR_WIDTH)])
        .split(rows[0]);

    map_view::render_map(frame, app, cols[0]);
    sidebar::render_sidebar(frame, app, cols[1]);

    match &app.mode {
        Mode::Draft { .. } | Mode::Edit { .. } => {
            form_popup::render_form_popup(frame, app, area);
        }
        Mode::Info { pin_id } => {
            info_popup::render_info_popup(frame, app, pin_id, area);
        }
        Mode::Confirm => {
            // The y/n prompt lives in the status row; the interrupted modal
            // stays visible behind it
            if app.form.is_some() {
                form_popup::render_form_popup(frame, app, area);
            } else if let Some(state) = &app.confirm
                && let Mode::Info { pin_id } = &state.return_to
            {
                info_popup::render_info_popup(frame, app, pin_id, area);
            }
        }
        _ => {}
    }

    // Help overlay (rendered on top of everything)
    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    status_row::render_status_row(frame, app, rows[1]);
}

pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
