use std::collections::HashMap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::App;

const MARKER_GLYPH: &str = "\u{25CF}"; // ●
const DRAFT_GLYPH: &str = "\u{25CB}"; // ○
const CROSSHAIR_GLYPH: &str = "\u{253C}"; // ┼
const GRATICULE_GLYPH: &str = "\u{00B7}"; // ·

/// Graticule line spacing in degrees for a zoom level
fn graticule_step(zoom: u8) -> f64 {
    match zoom {
        0..=2 => 30.0,
        3..=4 => 10.0,
        5..=6 => 5.0,
        7..=8 => 1.0,
        9..=10 => 0.5,
        11..=12 => 0.1,
        _ => 0.05,
    }
}

/// Does the span `[center - extent/2, center + extent/2)` cross a multiple
/// of `step`?
fn crosses_grid_line(center: f64, extent: f64, step: f64) -> bool {
    let lo = ((center - extent / 2.0) / step).floor();
    let hi = ((center + extent / 2.0) / step).floor();
    lo != hi
}

/// Render the map pane: graticule, markers, and the fixed center crosshair.
/// Also records the inner grid size so click targeting matches the screen.
pub fn render_map(frame: &mut Frame, app: &mut App, area: Rect) {
    let viewport = app.map.viewport;
    let title = format!(
        " {}  {:.4}, {:.4}  z{} ",
        app.board.config.board.name, viewport.center_lat, viewport.center_lng, viewport.zoom
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.dim).bg(app.theme.background))
        .title(Span::styled(
            title,
            Style::default()
                .fg(app.theme.text_bright)
                .bg(app.theme.background),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let (width, height) = (inner.width, inner.height);
    app.map_grid = (width, height);

    // One marker per cell; the first placed wins a contested cell
    let mut marker_cells: HashMap<(u16, u16), (bool, bool)> = HashMap::new();
    let selected_handle = app
        .selected
        .as_ref()
        .and_then(|id| app.markers.handle_for(id));
    for (handle, marker) in app.map.markers() {
        if let Some(cell) = viewport.project(marker.lat, marker.lng, width, height) {
            let is_draft = app
                .markers
                .pin_for(handle)
                .and_then(|id| app.board.store.get(id))
                .is_some_and(|p| p.is_draft());
            let is_selected = Some(handle) == selected_handle;
            let entry = marker_cells.entry(cell).or_insert((is_draft, is_selected));
            entry.1 |= is_selected;
        }
    }

    let bg = app.theme.background;
    let step = graticule_step(viewport.zoom);
    let crosshair_cell = (width / 2, height / 2);
    let dpc = crate::map::wrap_lng(
        viewport.cell_coords(1, 0, width, height).1 - viewport.cell_coords(0, 0, width, height).1,
    );

    let mut lines: Vec<Line> = Vec::with_capacity(height as usize);
    for row in 0..height {
        let mut spans: Vec<Span> = Vec::with_capacity(width as usize);
        for col in 0..width {
            let cell = (col, row);
            let span = if let Some((is_draft, is_selected)) = marker_cells.get(&cell) {
                let glyph = if *is_draft { DRAFT_GLYPH } else { MARKER_GLYPH };
                let mut style = Style::default()
                    .fg(if *is_draft {
                        app.theme.marker_draft
                    } else {
                        app.theme.marker
                    })
                    .bg(bg);
                if *is_selected {
                    style = style.bg(app.theme.selection_bg).add_modifier(Modifier::BOLD);
                }
                Span::styled(glyph, style)
            } else if cell == crosshair_cell {
                Span::styled(
                    CROSSHAIR_GLYPH,
                    Style::default().fg(app.theme.crosshair).bg(bg),
                )
            } else {
                let (lat, lng) = viewport.cell_coords(col, row, width, height);
                if crosses_grid_line(lng, dpc, step) || crosses_grid_line(lat, dpc * 2.0, step) {
                    Span::styled(
                        GRATICULE_GLYPH,
                        Style::default().fg(app.theme.graticule).bg(bg),
                    )
                } else {
                    Span::styled(" ", Style::default().bg(bg))
                }
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
