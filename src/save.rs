//! Saving an unfinished game so it can be resumed later.
//!
//! The save is a single JSON document holding the game and the time it was
//! written. Loading goes through the game's own validation, so a hand-edited
//! file cannot produce an inconsistent game.

use crate::game_state::GameState;
use crate::info_log;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

const APP_DIR: &str = "spaceman";
const SAVE_FILE: &str = "saved_game.json";

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("could not access save file: {0}")]
    Io(#[from] io::Error),
    #[error("could not read saved game: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no data directory available; pass --save-file")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub saved_at: DateTime<Utc>,
    pub game: GameState,
}

/// `<data_dir>/spaceman/saved_game.json`
pub fn default_save_path() -> Result<PathBuf, SaveError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR).join(SAVE_FILE))
        .ok_or(SaveError::NoDataDir)
}

/// Write `game` to `path`, creating parent directories as needed.
pub fn save_game(path: &Path, game: &GameState) -> Result<SavedGame, SaveError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let saved = SavedGame {
        saved_at: Utc::now(),
        game: game.clone(),
    };
    fs::write(path, serde_json::to_string_pretty(&saved)?)?;
    info_log!("Saved game to {}", path.display());
    Ok(saved)
}

/// Read the game saved at `path`. A missing file is not an error.
pub fn load_game(path: &Path) -> Result<Option<SavedGame>, SaveError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let saved: SavedGame = serde_json::from_str(&contents)?;
    info_log!(
        "Loaded game saved at {} from {}",
        saved.saved_at,
        path.display()
    );
    Ok(Some(saved))
}

/// Remove the save at `path`, if there is one.
pub fn clear_saved_game(path: &Path) -> Result<(), SaveError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
