use serde::Serialize;

use crate::model::pin::Pin;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct PinListJson<'a> {
    pub count: usize,
    pub pins: Vec<&'a Pin>,
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Format a pin as a one-line summary: `id  title  (lat, lng)`
pub fn format_pin_line(pin: &Pin) -> String {
    let short_id = &pin.id[..pin.id.len().min(8)];
    format!("{}  {}  ({})", short_id, pin.title, pin.coord_label())
}

/// Format a detailed pin view
pub fn format_pin_detail(pin: &Pin) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("{}  ({})", pin.title, pin.coord_label()));
    lines.push(format!("id: {}", pin.id));
    if !pin.description.is_empty() {
        lines.push(format!("description: {}", pin.description));
    }
    lines.push(format!(
        "created: {}",
        pin.created_at
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
    ));
    if let Some(updated) = pin.updated_at {
        lines.push(format!(
            "updated: {}",
            updated.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        ));
    }
    lines
}
