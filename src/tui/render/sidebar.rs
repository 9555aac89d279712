use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

/// Render the pin sidebar: newest confirmed pins first, filtered by the
/// active search term. Two lines per pin.
pub fn render_sidebar(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let rows: Vec<crate::view::SidebarRow> =
        app.visible_rows().into_iter().cloned().collect();

    let title = match app.effective_filter() {
        Some(term) => format!(" Pins /{} ({}) ", term, rows.len()),
        None => format!(" Pins ({}) ", rows.len()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(bg))
        .title(Span::styled(
            title,
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let width = inner.width as usize;
    let visible_entries = (inner.height as usize) / 2;

    // Keep the selected row in view
    let selected_index = app
        .selected
        .as_ref()
        .and_then(|id| rows.iter().position(|r| &r.pin_id == id));
    if let Some(i) = selected_index {
        if i < app.sidebar_scroll {
            app.sidebar_scroll = i;
        } else if visible_entries > 0 && i >= app.sidebar_scroll + visible_entries {
            app.sidebar_scroll = i + 1 - visible_entries;
        }
    }
    let scroll = app.sidebar_scroll.min(rows.len().saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (i, row) in rows.iter().enumerate().skip(scroll).take(visible_entries) {
        let selected = selected_index == Some(i);
        let row_bg = if selected { app.theme.selection_bg } else { bg };

        let mut title_style = Style::default().fg(app.theme.text_bright).bg(row_bg);
        if selected {
            title_style = title_style.add_modifier(Modifier::BOLD);
        }
        lines.push(Line::from(Span::styled(
            pad_to_width(&unicode::truncate_to_width(&row.title, width), width),
            title_style,
        )));

        let detail = format!("  {}  {}", row.coords, row.created);
        lines.push(Line::from(Span::styled(
            pad_to_width(&unicode::truncate_to_width(&detail, width), width),
            Style::default().fg(app.theme.dim).bg(row_bg),
        )));
    }

    if rows.is_empty() {
        let hint = if app.effective_filter().is_some() {
            "no matches"
        } else {
            "no pins yet — press Enter on the map"
        };
        lines.push(Line::from(Span::styled(
            unicode::truncate_to_width(hint, width),
            Style::default().fg(app.theme.dim).bg(bg),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn pad_to_width(s: &str, width: usize) -> String {
    let w = unicode::display_width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}
