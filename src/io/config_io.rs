use std::fs;
use std::path::Path;

use crate::io::board_io::BoardError;
use crate::model::config::BoardConfig;

/// Read and parse board.toml from the board directory.
pub fn read_config(board_dir: &Path) -> Result<BoardConfig, BoardError> {
    let config_path = board_dir.join("board.toml");
    let config_text = fs::read_to_string(&config_path).map_err(|e| BoardError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&config_text)?)
}
