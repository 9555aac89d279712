use indexmap::IndexMap;

use crate::model::config::MapConfig;

/// Latitude clip, web-map style (poles excluded).
pub const MAX_LAT: f64 = 85.0;
pub const MIN_ZOOM: u8 = 0;
pub const MAX_ZOOM: u8 = 16;

/// Opaque handle for a marker placed on a map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// The mapping collaborator boundary. The TUI map implements it for real;
/// presentation-sync tests drive a recording fake.
pub trait MapSurface {
    fn place_marker(&mut self, lat: f64, lng: f64) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn set_popup_content(&mut self, handle: MarkerHandle, content: &str);
    fn pan_to(&mut self, lat: f64, lng: f64, zoom: u8);
}

/// Clamp a latitude into the renderable band.
pub fn clamp_lat(lat: f64) -> f64 {
    lat.clamp(-MAX_LAT, MAX_LAT)
}

/// Normalize a longitude into [-180, 180).
pub fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Shortest signed east-west delta between two longitudes, in [-180, 180).
fn lng_delta(from: f64, to: f64) -> f64 {
    wrap_lng(to - from)
}

/// Degrees of longitude per terminal column at a zoom level. Rows cover
/// twice as much latitude because terminal cells are roughly 2:1 tall.
fn deg_per_col(zoom: u8) -> f64 {
    360.0 / (64.0 * (1u64 << zoom) as f64)
}

fn deg_per_row(zoom: u8) -> f64 {
    2.0 * deg_per_col(zoom)
}

/// A centered, zoomable window onto the world, projected onto a terminal
/// cell grid with an equirectangular mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center_lat: f64,
    pub center_lng: f64,
    pub zoom: u8,
}

impl Viewport {
    pub fn new(center_lat: f64, center_lng: f64, zoom: u8) -> Self {
        Viewport {
            center_lat: clamp_lat(center_lat),
            center_lng: wrap_lng(center_lng),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Project a coordinate into a cell of a `width` x `height` grid.
    /// Returns None when it falls outside the grid.
    pub fn project(&self, lat: f64, lng: f64, width: u16, height: u16) -> Option<(u16, u16)> {
        let col = f64::from(width) / 2.0 + lng_delta(self.center_lng, lng) / deg_per_col(self.zoom);
        let row = f64::from(height) / 2.0 - (lat - self.center_lat) / deg_per_row(self.zoom);
        let (col, row) = (col.floor(), row.floor());
        if col < 0.0 || row < 0.0 || col >= f64::from(width) || row >= f64::from(height) {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Coordinate at the center of a grid cell.
    pub fn cell_coords(&self, col: u16, row: u16, width: u16, height: u16) -> (f64, f64) {
        let dcol = f64::from(col) + 0.5 - f64::from(width) / 2.0;
        let drow = f64::from(row) + 0.5 - f64::from(height) / 2.0;
        let lat = clamp_lat(self.center_lat - drow * deg_per_row(self.zoom));
        let lng = wrap_lng(self.center_lng + dcol * deg_per_col(self.zoom));
        (lat, lng)
    }

    /// Pan by whole cells (positive dcol = east, positive drow = south).
    pub fn pan_cells(&mut self, dcol: i32, drow: i32) {
        self.center_lng = wrap_lng(self.center_lng + f64::from(dcol) * deg_per_col(self.zoom));
        self.center_lat = clamp_lat(self.center_lat - f64::from(drow) * deg_per_row(self.zoom));
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1).max(MIN_ZOOM);
    }
}

/// A placed marker on the terminal map.
#[derive(Debug, Clone)]
pub struct Marker {
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
}

/// The terminal-rendered map widget: a viewport plus the markers currently
/// placed on it. Markers live here only as view handles; the pin store owns
/// the canonical records.
#[derive(Debug)]
pub struct TerminalMap {
    pub viewport: Viewport,
    markers: IndexMap<MarkerHandle, Marker>,
    next_handle: u64,
}

impl TerminalMap {
    pub fn new(config: &MapConfig) -> Self {
        TerminalMap {
            viewport: Viewport::new(config.center_lat, config.center_lng, config.zoom),
            markers: IndexMap::new(),
            next_handle: 1,
        }
    }

    pub fn marker(&self, handle: MarkerHandle) -> Option<&Marker> {
        self.markers.get(&handle)
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &Marker)> {
        self.markers.iter().map(|(h, m)| (*h, m))
    }

    /// First marker that projects into the given cell, in placement order.
    pub fn marker_at_cell(
        &self,
        col: u16,
        row: u16,
        width: u16,
        height: u16,
    ) -> Option<MarkerHandle> {
        self.markers.iter().find_map(|(h, m)| {
            (self.viewport.project(m.lat, m.lng, width, height) == Some((col, row))).then_some(*h)
        })
    }
}

impl MapSurface for TerminalMap {
    fn place_marker(&mut self, lat: f64, lng: f64) -> MarkerHandle {
        let handle = MarkerHandle(self.next_handle);
        self.next_handle += 1;
        self.markers.insert(
            handle,
            Marker {
                lat,
                lng,
                popup: String::new(),
            },
        );
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.markers.shift_remove(&handle);
    }

    fn set_popup_content(&mut self, handle: MarkerHandle, content: &str) {
        if let Some(marker) = self.markers.get_mut(&handle) {
            marker.popup = content.to_string();
        }
    }

    fn pan_to(&mut self, lat: f64, lng: f64, zoom: u8) {
        self.viewport = Viewport::new(lat, lng, zoom);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const W: u16 = 80;
    const H: u16 = 24;

    #[test]
    fn test_center_projects_to_middle_cell() {
        let vp = Viewport::new(35.0, 139.0, 8);
        assert_eq!(vp.project(35.0, 139.0, W, H), Some((W / 2, H / 2)));
    }

    #[test]
    fn test_project_cell_coords_round_trip() {
        let vp = Viewport::new(35.0, 139.0, 8);
        let (lat, lng) = vp.cell_coords(10, 5, W, H);
        assert_eq!(vp.project(lat, lng, W, H), Some((10, 5)));
    }

    #[test]
    fn test_far_coordinates_fall_outside_grid() {
        let vp = Viewport::new(35.0, 139.0, 8);
        assert_eq!(vp.project(-33.86, 151.2, W, H), None);
    }

    #[test]
    fn test_everything_visible_at_zoom_zero() {
        // One column covers 5.625 degrees at zoom 0; the whole world fits
        let vp = Viewport::new(0.0, 0.0, 0);
        assert!(vp.project(-33.86, 151.2, W, H).is_some());
        assert!(vp.project(60.0, -150.0, W, H).is_some());
    }

    #[test]
    fn test_wrap_lng_normalizes() {
        assert_eq!(wrap_lng(190.0), -170.0);
        assert_eq!(wrap_lng(-190.0), 170.0);
        assert_eq!(wrap_lng(180.0), -180.0);
        assert_eq!(wrap_lng(0.0), 0.0);
    }

    #[test]
    fn test_projection_crosses_antimeridian() {
        let vp = Viewport::new(0.0, 179.5, 8);
        // Just east of the antimeridian is a short hop, not a world away
        let cell = vp.project(0.0, -179.5, W, H);
        assert!(cell.is_some());
        assert!(cell.unwrap().0 > W / 2);
    }

    #[test]
    fn test_pan_moves_the_window() {
        let mut vp = Viewport::new(35.0, 139.0, 8);
        let before = vp.center_lng;
        vp.pan_cells(4, 0);
        assert!(vp.center_lng > before);
        vp.pan_cells(0, 3);
        assert!(vp.center_lat < 35.0);
    }

    #[test]
    fn test_pan_clamps_latitude() {
        let mut vp = Viewport::new(84.9, 0.0, 0);
        vp.pan_cells(0, -500);
        assert_eq!(vp.center_lat, MAX_LAT);
    }

    #[test]
    fn test_zoom_clamps_at_bounds() {
        let mut vp = Viewport::new(0.0, 0.0, MAX_ZOOM);
        vp.zoom_in();
        assert_eq!(vp.zoom, MAX_ZOOM);
        let mut vp = Viewport::new(0.0, 0.0, MIN_ZOOM);
        vp.zoom_out();
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_terminal_map_place_and_remove() {
        let mut map = TerminalMap::new(&MapConfig::default());
        let a = map.place_marker(35.0, 139.0);
        let b = map.place_marker(36.0, 140.0);
        assert_ne!(a, b);
        assert_eq!(map.markers().count(), 2);

        map.remove_marker(a);
        assert!(map.marker(a).is_none());
        assert_eq!(map.markers().count(), 1);
    }

    #[test]
    fn test_terminal_map_popup_content() {
        let mut map = TerminalMap::new(&MapConfig::default());
        let h = map.place_marker(35.0, 139.0);
        map.set_popup_content(h, "Cafe");
        assert_eq!(map.marker(h).unwrap().popup, "Cafe");
    }

    #[test]
    fn test_marker_at_cell_finds_projected_marker() {
        let mut map = TerminalMap::new(&MapConfig::default());
        map.pan_to(35.0, 139.0, 8);
        let h = map.place_marker(35.0, 139.0);
        assert_eq!(map.marker_at_cell(W / 2, H / 2, W, H), Some(h));
        assert_eq!(map.marker_at_cell(0, 0, W, H), None);
    }

    #[test]
    fn test_pan_to_recenters_viewport() {
        let mut map = TerminalMap::new(&MapConfig::default());
        map.pan_to(-33.86, 151.2, 9);
        assert_eq!(map.viewport.zoom, 9);
        assert!((map.viewport.center_lat + 33.86).abs() < 1e-9);
    }
}
