use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::model::pin::{MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS};
use crate::tui::app::{App, FormField, Mode};
use crate::util::unicode;

/// Render the pin entry form over a draft or an existing pin.
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form else { return };

    let pin_id = match &app.mode {
        Mode::Draft { pin_id } | Mode::Edit { pin_id } => Some(pin_id.as_str()),
        Mode::Confirm => app.confirm.as_ref().and_then(|s| match &s.return_to {
            Mode::Draft { pin_id } | Mode::Edit { pin_id } => Some(pin_id.as_str()),
            _ => None,
        }),
        _ => None,
    };
    let coords = pin_id
        .and_then(|id| app.board.store.get(id))
        .map(|p| p.coord_label())
        .unwrap_or_default();
    let editing = matches!(&app.mode, Mode::Edit { .. })
        || matches!(
            app.confirm.as_ref().map(|s| &s.return_to),
            Some(Mode::Edit { .. })
        );

    let bg = app.theme.background;
    let popup_w: u16 = 46.min(area.width.saturating_sub(2));
    let popup_h: u16 = 9;
    let overlay = super::centered_rect_fixed(popup_w, popup_h, area);
    let inner_w = popup_w.saturating_sub(4) as usize;

    let header = if editing { " Edit Pin " } else { " New Pin " };
    let label_style = Style::default().fg(app.theme.dim).bg(bg);
    let count_ok = Style::default().fg(app.theme.dim).bg(bg);
    let count_over = Style::default().fg(app.theme.red).bg(bg);

    let title_count = form.title.trim().chars().count();
    let desc_count = form.description.trim().chars().count();

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(
        format!("  {}", coords),
        Style::default().fg(app.theme.dim).bg(bg),
    )));
    lines.push(field_line(
        app,
        form,
        FormField::Title,
        "Title",
        inner_w,
    ));
    lines.push(Line::from(Span::styled(
        format!("  {}/{}", title_count, MAX_TITLE_CHARS),
        if title_count > MAX_TITLE_CHARS {
            count_over
        } else {
            count_ok
        },
    )));
    lines.push(field_line(
        app,
        form,
        FormField::Description,
        "Description",
        inner_w,
    ));
    lines.push(Line::from(Span::styled(
        format!("  {}/{}", desc_count, MAX_DESCRIPTION_CHARS),
        if desc_count > MAX_DESCRIPTION_CHARS {
            count_over
        } else {
            count_ok
        },
    )));
    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            format!("  {}", unicode::truncate_to_width(error, inner_w)),
            Style::default().fg(app.theme.red).bg(bg),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "  Enter save  Tab field  Esc cancel",
            label_style,
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.popup_border).bg(bg))
        .title(Span::styled(
            header,
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, overlay);
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// One labeled input line, with a block cursor in the focused field.
fn field_line<'a>(
    app: &App,
    form: &'a crate::tui::app::FormState,
    field: FormField,
    label: &'a str,
    inner_w: usize,
) -> Line<'a> {
    let bg = app.theme.background;
    let focused = form.field == field && !matches!(app.mode, Mode::Confirm);
    let text = match field {
        FormField::Title => &form.title,
        FormField::Description => &form.description,
    };
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let label_style = if focused {
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.dim).bg(bg)
    };

    let budget = inner_w.saturating_sub(14);
    let mut spans = vec![Span::styled(format!("  {:<12}", label), label_style)];
    if focused {
        let (before, after) = text.split_at(form.cursor.min(text.len()));
        spans.push(Span::styled(
            unicode::truncate_to_width(before, budget),
            text_style,
        ));
        spans.push(Span::styled(
            "\u{258C}",
            Style::default().fg(app.theme.highlight).bg(bg),
        ));
        spans.push(Span::styled(
            unicode::truncate_to_width(after, budget.saturating_sub(unicode::display_width(before))),
            text_style,
        ));
    } else {
        spans.push(Span::styled(
            unicode::truncate_to_width(text, budget),
            text_style,
        ));
    }
    Line::from(spans)
}
