//! Best-score persistence on disk
//!
//! A small versioned JSON record. Missing file means "no best score yet";
//! a record from another version is treated the same way.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;
use crate::platform::ScoreStore;

/// Bump to discard every stored record
pub const RECORD_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreRecord {
    version: u32,
    best_score: u64,
}

/// `ScoreStore` backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for JsonFileStore {
    fn load_best_score(&mut self) -> Result<u64, PlatformError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(err) => return Err(err.into()),
        };

        let record: BestScoreRecord = serde_json::from_str(&json)?;
        if record.version != RECORD_VERSION {
            log::warn!(
                "Ignoring best score record version {} (expected {RECORD_VERSION})",
                record.version
            );
            return Ok(0);
        }
        log::info!("Loaded best score {}", record.best_score);
        Ok(record.best_score)
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), PlatformError> {
        let record = BestScoreRecord {
            version: RECORD_VERSION,
            best_score: score,
        };
        let json = serde_json::to_string(&record)?;

        // Write beside the target, then swap it in
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Best score {score} saved to {}", self.path.display());
        Ok(())
    }
}
