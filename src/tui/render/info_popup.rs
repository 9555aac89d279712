use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

/// Render the read-only details popup for a pin.
pub fn render_info_popup(frame: &mut Frame, app: &App, pin_id: &str, area: Rect) {
    let Some(pin) = app.board.store.get(pin_id) else {
        return;
    };

    let bg = app.theme.background;
    let popup_w: u16 = 46.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let dim = Style::default().fg(app.theme.dim).bg(bg);
    let text = Style::default().fg(app.theme.text).bg(bg);
    let bright = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("  {}", unicode::truncate_to_width(&pin.title, inner_w)),
        bright,
    )));
    if !pin.description.is_empty() {
        for wrapped in wrap_text(&pin.description, inner_w.saturating_sub(2)) {
            lines.push(Line::from(Span::styled(format!("  {}", wrapped), text)));
        }
    }
    lines.push(Line::from(Span::styled("", text)));
    lines.push(Line::from(Span::styled(
        format!("  {}", pin.coord_label()),
        dim,
    )));
    lines.push(Line::from(Span::styled(
        format!("  created {}", pin.created_at.format("%Y-%m-%d %H:%M")),
        dim,
    )));
    if let Some(updated) = pin.updated_at {
        lines.push(Line::from(Span::styled(
            format!("  updated {}", updated.format("%Y-%m-%d %H:%M")),
            dim,
        )));
    }
    lines.push(Line::from(Span::styled("", text)));
    lines.push(Line::from(Span::styled(
        "  e edit  x delete  Esc close",
        dim,
    )));

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay = super::centered_rect_fixed(popup_w, popup_h, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.popup_border).bg(bg))
        .title(Span::styled(" Pin ", Style::default().fg(app.theme.highlight).bg(bg)))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// Word-wrap `text` into lines of at most `max_width` cells.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let space = if current.is_empty() { 0 } else { 1 };
        if !current.is_empty()
            && unicode::display_width(&current) + space + unicode::display_width(word) > max_width
        {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
