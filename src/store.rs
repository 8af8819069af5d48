//! Best score persistence.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::ports::ScoreStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreFile {
    best_score: u32,
}

/// Keeps the best score as a small JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Store at `<data dir>/skyhop/best_score.json`, creating the directory.
    pub fn new() -> Result<Self, StoreError> {
        let dirs = ProjectDirs::from("", "", "skyhop").ok_or(StoreError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir)?;
        Ok(Self::at(data_dir.join("best_score.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is a best score of 0, not an error.
    pub fn read(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        let file: BestScoreFile = serde_json::from_str(&text)?;
        Ok(file.best_score)
    }

    pub fn write(&self, best_score: u32) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(&BestScoreFile { best_score })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn load_best_score(&self) -> u32 {
        self.read().unwrap_or_else(|e| {
            warn!("ignoring best score at {}: {e}", self.path.display());
            0
        })
    }

    fn save_best_score(&mut self, score: u32) {
        if let Err(e) = self.write(score) {
            warn!("failed to save best score to {}: {e}", self.path.display());
        }
    }
}

/// In-memory store. Clones share the same slot, so a clone handed to a
/// second game behaves like the same storage after a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Rc<Cell<u32>>,
}

impl MemoryScoreStore {
    pub fn with_best(best: u32) -> Self {
        Self {
            best: Rc::new(Cell::new(best)),
        }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best_score(&self) -> u32 {
        self.best.get()
    }

    fn save_best_score(&mut self, score: u32) {
        self.best.set(score);
    }
}
