use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Map", header_style)));
    add_binding(&mut lines, " \u{2190}\u{2191}\u{2193}\u{2192}/hjkl", "Pan", key_style, desc_style);
    add_binding(&mut lines, " +/-", "Zoom in / out", key_style, desc_style);
    add_binding(&mut lines, " g", "Go to home view", key_style, desc_style);
    add_binding(
        &mut lines,
        " Enter",
        "Pin at crosshair / open marker",
        key_style,
        desc_style,
    );
    add_binding(&mut lines, " a", "New pin at crosshair", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Pins", header_style)));
    add_binding(&mut lines, " Tab/n p", "Next / previous pin", key_style, desc_style);
    add_binding(&mut lines, " o", "Details of selected pin", key_style, desc_style);
    add_binding(&mut lines, " e", "Edit (from details)", key_style, desc_style);
    add_binding(&mut lines, " x/Del", "Delete pin", key_style, desc_style);
    add_binding(&mut lines, " C", "Clear all pins", key_style, desc_style);
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(" Other", header_style)));
    add_binding(&mut lines, " /", "Filter sidebar", key_style, desc_style);
    add_binding(&mut lines, " ?", "Toggle this help", key_style, desc_style);
    add_binding(&mut lines, " q", "Quit", key_style, desc_style);

    let popup_w: u16 = 44.min(area.width.saturating_sub(2));
    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay = super::centered_rect_fixed(popup_w, popup_h, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.popup_border).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    lines.push(Line::from(vec![
        Span::styled(format!("{:<14}", key), key_style),
        Span::styled(desc, desc_style),
    ]));
}
