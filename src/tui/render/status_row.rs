use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &app.mode {
        Mode::Search => {
            // Search prompt: /term▌
            let spans = vec![
                Span::styled(
                    format!("/{}", app.search_input),
                    Style::default().fg(app.theme.text_bright).bg(bg),
                ),
                Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            with_hint(spans, "Enter apply  Esc clear", app, width)
        }
        Mode::Confirm => {
            let prompt = app
                .confirm
                .as_ref()
                .map(|s| s.prompt.as_str())
                .unwrap_or("");
            let spans = vec![Span::styled(
                format!("{} ", prompt),
                Style::default().fg(app.theme.yellow).bg(bg),
            )];
            with_hint(spans, "y confirm  n cancel", app, width)
        }
        _ => {
            if let Some(message) = &app.status_message {
                Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(app.theme.yellow).bg(bg),
                ))
            } else if let Some(filter) = &app.filter {
                let spans = vec![Span::styled(
                    format!("/{}", filter),
                    Style::default().fg(app.theme.dim).bg(bg),
                )];
                with_hint(spans, "/ edit filter  Esc clear", app, width)
            } else if app.board.config.ui.show_key_hints {
                Line::from(Span::styled(
                    "arrows pan  +/- zoom  Enter pin/info  / search  ? help  q quit",
                    Style::default().fg(app.theme.dim).bg(bg),
                ))
            } else {
                Line::from(Span::styled(" ".repeat(width), Style::default().bg(bg)))
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Pad a left-aligned span group and append a right-aligned dim hint.
fn with_hint<'a>(mut spans: Vec<Span<'a>>, hint: &'a str, app: &App, width: usize) -> Line<'a> {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hint_width = hint.chars().count();
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            hint,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    Line::from(spans)
}
