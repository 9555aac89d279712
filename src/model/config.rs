use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from board.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

/// Initial map viewport. Also the target of the "go home" key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center_lat")]
    pub center_lat: f64,
    #[serde(default = "default_center_lng")]
    pub center_lng: f64,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            center_lat: default_center_lat(),
            center_lng: default_center_lng(),
            zoom: default_zoom(),
        }
    }
}

fn default_center_lat() -> f64 {
    35.6812
}

fn default_center_lng() -> f64 {
    139.7671
}

fn default_zoom() -> u8 {
    6
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_show_key_hints")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name (e.g. "marker" = "#FF4444").
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: default_show_key_hints(),
            colors: HashMap::new(),
        }
    }
}

fn default_show_key_hints() -> bool {
    true
}
