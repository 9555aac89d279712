use std::path::{Path, PathBuf};

use crate::io::config_io;
use crate::io::storage::{self, StorageError};
use crate::model::board::Board;
use crate::store::PinStore;

/// Error type for board I/O operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("not a pinmap board: no pinboard/ directory found")]
    NotABoard,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse board.toml: {0}")]
    ConfigParseError(#[from] toml::de::Error),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Discover the board by walking up from the given directory,
/// looking for a `pinboard/` subdirectory with a board.toml inside.
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardError> {
    let mut current = start.to_path_buf();
    loop {
        let board_dir = current.join("pinboard");
        if board_dir.is_dir() && board_dir.join("board.toml").exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(BoardError::NotABoard);
        }
    }
}

/// Load a board from the given root directory.
///
/// A malformed or unreadable pins.json is not fatal: the board comes up with
/// an empty store and `storage_warning` set, and in-memory state is
/// authoritative from then on.
pub fn load_board(root: &Path) -> Result<Board, BoardError> {
    let board_dir = root.join("pinboard");
    if !board_dir.is_dir() {
        return Err(BoardError::NotABoard);
    }

    let config = config_io::read_config(&board_dir)?;

    let (store, storage_warning) = match storage::restore(&storage::pins_path(&board_dir)) {
        Ok(pins) => (PinStore::from_pins(pins), None),
        Err(e) => (PinStore::new(), Some(e.to_string())),
    };

    Ok(Board {
        root: root.to_path_buf(),
        board_dir,
        config,
        store,
        storage_warning,
    })
}

/// Persist the board's confirmed pins to its slot.
pub fn save_pins(board: &Board) -> Result<(), StorageError> {
    storage::persist(&board.pins_path(), &board.store.list())
}
