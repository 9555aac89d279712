use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum title length in characters (not bytes).
pub const MAX_TITLE_CHARS: usize = 50;
/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// A user-placed geographic annotation.
///
/// The serde layout is the persisted wire format: camelCase keys,
/// RFC 3339 timestamps, `updatedAt` omitted until the first edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    /// Opaque unique identifier.
    pub id: String,
    /// Latitude in degrees. Immutable after creation.
    pub lat: f64,
    /// Longitude in degrees. Immutable after creation.
    pub lng: f64,
    /// Empty while the pin is an unconfirmed draft.
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Pin {
    /// Create a fresh draft pin at the given coordinates.
    pub fn draft(id: String, lat: f64, lng: f64) -> Self {
        Pin {
            id,
            lat,
            lng,
            title: String::new(),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// A pin with an empty title has not been confirmed yet.
    /// Title emptiness is the sole draft discriminator.
    pub fn is_draft(&self) -> bool {
        self.title.is_empty()
    }

    /// Short coordinate label, e.g. `35.0000, 139.0000`.
    pub fn coord_label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}
