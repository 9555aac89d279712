use std::collections::HashSet;

use indexmap::IndexMap;

use crate::map::{MapSurface, MarkerHandle};
use crate::model::pin::Pin;

/// One sidebar entry, fully rendered to text. The sidebar consumes these
/// rows; it never reaches back into the pin store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub pin_id: String,
    pub title: String,
    pub description: String,
    pub coords: String,
    /// Creation date, YYYY-MM-DD
    pub created: String,
}

/// Build sidebar rows from an already ordered confirmed-pin list.
pub fn build_rows(pins: &[&Pin]) -> Vec<SidebarRow> {
    pins.iter()
        .map(|pin| SidebarRow {
            pin_id: pin.id.clone(),
            title: pin.title.clone(),
            description: pin.description.clone(),
            coords: pin.coord_label(),
            created: pin.created_at.format("%Y-%m-%d").to_string(),
        })
        .collect()
}

/// Presentation-side search predicate: case-insensitive substring over the
/// row's rendered title and description. Filtering hides rows; it never
/// touches the store.
pub fn row_matches(row: &SidebarRow, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    row.title.to_lowercase().contains(&needle)
        || row.description.to_lowercase().contains(&needle)
}

/// Popup text pushed to a pin's marker.
pub fn popup_content(pin: &Pin) -> String {
    if pin.is_draft() {
        return "(unconfirmed pin)".to_string();
    }
    if pin.description.is_empty() {
        pin.title.clone()
    } else {
        format!("{}\n{}", pin.title, pin.description)
    }
}

/// Reconciles the pin set against a map surface.
///
/// Owns the pin-id → marker-handle mapping plus the popup content last
/// pushed per pin, so an edit refreshes content without re-placing the
/// marker. Geometry is immutable after creation, so a surviving pin's
/// marker is never touched except for popup updates.
#[derive(Debug, Default)]
pub struct MarkerSync {
    handles: IndexMap<String, MarkerHandle>,
    popups: IndexMap<String, String>,
}

impl MarkerSync {
    pub fn new() -> Self {
        MarkerSync::default()
    }

    /// Diff `pins` (all pins, drafts included) against the placed markers.
    pub fn reconcile(&mut self, surface: &mut dyn MapSurface, pins: &[&Pin]) {
        let live: HashSet<&str> = pins.iter().map(|p| p.id.as_str()).collect();

        // Remove markers for pins that no longer exist
        let gone: Vec<String> = self
            .handles
            .keys()
            .filter(|id| !live.contains(id.as_str()))
            .cloned()
            .collect();
        for id in gone {
            if let Some(handle) = self.handles.shift_remove(&id) {
                surface.remove_marker(handle);
            }
            self.popups.shift_remove(&id);
        }

        // Place markers for new pins, refresh popup content on change
        for pin in pins {
            let content = popup_content(pin);
            match self.handles.get(&pin.id) {
                None => {
                    let handle = surface.place_marker(pin.lat, pin.lng);
                    surface.set_popup_content(handle, &content);
                    self.handles.insert(pin.id.clone(), handle);
                    self.popups.insert(pin.id.clone(), content);
                }
                Some(&handle) => {
                    if self.popups.get(&pin.id) != Some(&content) {
                        surface.set_popup_content(handle, &content);
                        self.popups.insert(pin.id.clone(), content);
                    }
                }
            }
        }
    }

    pub fn handle_for(&self, pin_id: &str) -> Option<MarkerHandle> {
        self.handles.get(pin_id).copied()
    }

    /// Reverse lookup: which pin owns a marker (marker-click dispatch).
    pub fn pin_for(&self, handle: MarkerHandle) -> Option<&str> {
        self.handles
            .iter()
            .find_map(|(id, h)| (*h == handle).then_some(id.as_str()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pin(id: &str, title: &str) -> Pin {
        Pin {
            id: id.to_string(),
            lat: 35.0,
            lng: 139.0,
            title: title.to_string(),
            description: String::new(),
            created_at: "2025-05-01T09:00:00Z".parse().unwrap(),
            updated_at: None,
        }
    }

    /// Records every surface call so tests can assert reconciliation work.
    #[derive(Default)]
    struct FakeSurface {
        next: u64,
        calls: Vec<String>,
    }

    impl MapSurface for FakeSurface {
        fn place_marker(&mut self, lat: f64, lng: f64) -> MarkerHandle {
            self.next += 1;
            self.calls.push(format!("place({lat},{lng})"));
            MarkerHandle(self.next)
        }
        fn remove_marker(&mut self, handle: MarkerHandle) {
            self.calls.push(format!("remove({})", handle.0));
        }
        fn set_popup_content(&mut self, handle: MarkerHandle, content: &str) {
            self.calls.push(format!("popup({},{})", handle.0, content));
        }
        fn pan_to(&mut self, lat: f64, lng: f64, zoom: u8) {
            self.calls.push(format!("pan({lat},{lng},{zoom})"));
        }
    }

    #[test]
    fn test_build_rows_renders_fields() {
        let p = pin("a1", "Cafe");
        let rows = build_rows(&[&p]);
        assert_eq!(
            rows,
            vec![SidebarRow {
                pin_id: "a1".into(),
                title: "Cafe".into(),
                description: String::new(),
                coords: "35.0000, 139.0000".into(),
                created: "2025-05-01".into(),
            }]
        );
    }

    #[test]
    fn test_row_matches_is_case_insensitive() {
        let p = pin("a1", "Cafe");
        let rows = build_rows(&[&p]);
        assert!(row_matches(&rows[0], "CAFE"));
        assert!(row_matches(&rows[0], ""));
        assert!(!row_matches(&rows[0], "xyz"));
    }

    #[test]
    fn test_row_matches_description() {
        let mut p = pin("a1", "Dock");
        p.description = "good Ramen nearby".into();
        let rows = build_rows(&[&p]);
        assert!(row_matches(&rows[0], "ramen"));
    }

    #[test]
    fn test_reconcile_places_new_pins_once() {
        let mut sync = MarkerSync::new();
        let mut surface = FakeSurface::default();
        let p = pin("a1", "Cafe");

        sync.reconcile(&mut surface, &[&p]);
        assert_eq!(surface.calls, vec!["place(35,139)", "popup(1,Cafe)"]);

        // Second pass with no changes does nothing
        surface.calls.clear();
        sync.reconcile(&mut surface, &[&p]);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_reconcile_removes_vanished_pins() {
        let mut sync = MarkerSync::new();
        let mut surface = FakeSurface::default();
        let a = pin("a1", "Cafe");
        let b = pin("b2", "Dock");

        sync.reconcile(&mut surface, &[&a, &b]);
        surface.calls.clear();

        sync.reconcile(&mut surface, &[&b]);
        assert_eq!(surface.calls, vec!["remove(1)"]);
        assert!(sync.handle_for("a1").is_none());
        assert!(sync.handle_for("b2").is_some());
    }

    #[test]
    fn test_reconcile_edit_refreshes_popup_without_replacing() {
        let mut sync = MarkerSync::new();
        let mut surface = FakeSurface::default();
        let mut p = pin("a1", "Cafe");

        sync.reconcile(&mut surface, &[&p]);
        surface.calls.clear();

        p.title = "Cafe Luna".into();
        p.description = "open late".into();
        sync.reconcile(&mut surface, &[&p]);
        assert_eq!(surface.calls, vec!["popup(1,Cafe Luna\nopen late)"]);
    }

    #[test]
    fn test_reconcile_draft_gets_marker_with_placeholder_popup() {
        let mut sync = MarkerSync::new();
        let mut surface = FakeSurface::default();
        let draft = pin("d1", "");

        sync.reconcile(&mut surface, &[&draft]);
        assert_eq!(
            surface.calls,
            vec!["place(35,139)", "popup(1,(unconfirmed pin))"]
        );
    }

    #[test]
    fn test_pin_for_reverse_lookup() {
        let mut sync = MarkerSync::new();
        let mut surface = FakeSurface::default();
        let p = pin("a1", "Cafe");
        sync.reconcile(&mut surface, &[&p]);

        let handle = sync.handle_for("a1").unwrap();
        assert_eq!(sync.pin_for(handle), Some("a1"));
        assert_eq!(sync.pin_for(MarkerHandle(99)), None);
    }
}
