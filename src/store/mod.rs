use chrono::Utc;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::model::pin::{MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, Pin};

/// Error type for pin store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("pin not found: {0}")]
    NotFound(String),
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("title exceeds {MAX_TITLE_CHARS} characters")]
    TitleTooLong,
    #[error("description exceeds {MAX_DESCRIPTION_CHARS} characters")]
    DescriptionTooLong,
}

impl StoreError {
    /// True for input problems the user can fix in the entry form.
    pub fn is_validation(&self) -> bool {
        !matches!(self, StoreError::NotFound(_))
    }
}

/// The authoritative in-memory pin collection, keyed by identifier.
///
/// Map markers and sidebar rows are transient views derived from this store;
/// nothing else owns canonical pin records.
#[derive(Debug, Default)]
pub struct PinStore {
    pins: IndexMap<String, Pin>,
}

impl PinStore {
    pub fn new() -> Self {
        PinStore::default()
    }

    /// Rebuild a store from a restored pin sequence. Duplicate ids keep the
    /// last occurrence; draft entries should never reach persisted data but
    /// are tolerated here.
    pub fn from_pins(pins: Vec<Pin>) -> Self {
        let mut store = PinStore::new();
        for pin in pins {
            store.pins.insert(pin.id.clone(), pin);
        }
        store
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Insert a draft pin at the given coordinates and return its id.
    /// Ids are UUID v4, so rapid invocation cannot collide.
    pub fn create(&mut self, lat: f64, lng: f64) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.pins.insert(id.clone(), Pin::draft(id.clone(), lat, lng));
        id
    }

    /// Set title/description on a pin, marking it confirmed.
    /// Re-confirming an already confirmed pin overwrites prior values.
    pub fn confirm(&mut self, id: &str, title: &str, description: &str) -> Result<(), StoreError> {
        validate(title, description)?;
        let pin = self
            .pins
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        pin.title = title.to_string();
        pin.description = description.to_string();
        pin.updated_at = Some(Utc::now());
        Ok(())
    }

    /// Remove a pin only while its title is still empty. Safe to call on
    /// confirmed or absent ids (no-op), so cancel paths can fire it blindly.
    pub fn discard_draft(&mut self, id: &str) {
        if self.pins.get(id).is_some_and(Pin::is_draft) {
            self.pins.shift_remove(id);
        }
    }

    /// Remove a pin unconditionally. Returns the removed pin.
    pub fn delete(&mut self, id: &str) -> Result<Pin, StoreError> {
        self.pins
            .shift_remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Remove all pins.
    pub fn clear(&mut self) {
        self.pins.clear();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn get(&self, id: &str) -> Option<&Pin> {
        self.pins.get(id)
    }

    /// All pins including drafts, in insertion order. Drafts still occupy a
    /// map marker, so the marker reconciler consumes this.
    pub fn all(&self) -> Vec<&Pin> {
        self.pins.values().collect()
    }

    /// Confirmed pins, newest creation first, ties broken by id.
    pub fn list(&self) -> Vec<&Pin> {
        let mut pins: Vec<&Pin> = self.pins.values().filter(|p| !p.is_draft()).collect();
        pins.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        pins
    }

    /// Number of confirmed pins.
    pub fn count(&self) -> usize {
        self.pins.values().filter(|p| !p.is_draft()).count()
    }

    /// Case-insensitive substring match against title or description.
    /// An empty term returns all confirmed pins.
    pub fn search(&self, term: &str) -> Vec<&Pin> {
        if term.is_empty() {
            return self.list();
        }
        let needle = term.to_lowercase();
        self.list()
            .into_iter()
            .filter(|p| {
                p.title.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn validate(title: &str, description: &str) -> Result<(), StoreError> {
    if title.is_empty() {
        return Err(StoreError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(StoreError::TitleTooLong);
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(StoreError::DescriptionTooLong);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
