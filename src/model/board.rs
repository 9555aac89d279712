use std::path::PathBuf;

use super::config::BoardConfig;
use crate::store::PinStore;

/// A fully loaded pin board
#[derive(Debug)]
pub struct Board {
    /// Root directory of the board (parent of `pinboard/`)
    pub root: PathBuf,
    /// Path to the `pinboard/` directory
    pub board_dir: PathBuf,
    /// Parsed board.toml
    pub config: BoardConfig,
    /// The authoritative in-memory pin collection
    pub store: PinStore,
    /// Set when pins.json existed but could not be restored at load time
    pub storage_warning: Option<String>,
}

impl Board {
    /// Path to the persisted pin slot.
    pub fn pins_path(&self) -> PathBuf {
        crate::io::storage::pins_path(&self.board_dir)
    }
}
