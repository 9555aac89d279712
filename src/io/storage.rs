use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::pin::Pin;

/// Fixed name of the persisted pin slot inside the board directory.
pub const PINS_FILE: &str = "pins.json";

/// Error type for pin persistence
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: io::Error,
    },
    #[error("stored pins are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn pins_path(board_dir: &Path) -> PathBuf {
    board_dir.join(PINS_FILE)
}

/// Serialize pins to the slot as a JSON array. Callers pass the confirmed
/// list only; drafts are never persisted. Write failures surface to the
/// caller so durability loss can be reported, never swallowed.
pub fn persist(path: &Path, pins: &[&Pin]) -> Result<(), StorageError> {
    let content = serde_json::to_string_pretty(pins)?;
    atomic_write(path, content.as_bytes()).map_err(|e| StorageError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Deserialize previously persisted pins. A missing slot is an empty board;
/// unreadable or malformed data is an error the caller recovers from by
/// falling back to an empty state.
pub fn restore(path: &Path) -> Result<Vec<Pin>, StorageError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(StorageError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let pins: Vec<Pin> = serde_json::from_str(&content)?;
    Ok(pins)
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
