//! High score persistence.
//!
//! A single JSON file of the form `{"highscore": N}`. A missing or unreadable
//! file is treated as "no record yet" rather than an error, so a fresh
//! install starts from zero.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default file name, created in the working directory.
pub const HIGHSCORE_FILE: &str = "blockfall_highscore.json";

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    highscore: u32,
}

/// Load the stored highscore, defaulting to 0 when the file is missing or
/// corrupt.
pub fn load_highscore(path: &Path) -> u32 {
    let Ok(raw) = fs::read_to_string(path) else {
        return 0;
    };
    match serde_json::from_str::<HighScoreFile>(&raw) {
        Ok(file) => file.highscore,
        Err(_) => 0,
    }
}

/// Write the highscore back to disk.
pub fn save_highscore(path: &Path, highscore: u32) -> Result<()> {
    let body = serde_json::to_string(&HighScoreFile { highscore })?;
    fs::write(path, body).with_context(|| format!("writing highscore to {}", path.display()))?;
    Ok(())
}
