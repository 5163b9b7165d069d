//! High-score persistence.
//!
//! A single integer survives across runs and processes. Storage failures
//! never reach the player: reads degrade to 0 and writes are dropped, both
//! with a warning in the log.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Backing storage for the high score.
pub trait HighScoreStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<u32>, StoreError>;
    fn write(&mut self, score: u32) -> Result<(), StoreError>;
}

// ── File store ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

/// JSON file holding `{"high_score": N}`.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for FileStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let file: HighScoreFile = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(file.high_score))
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        let json = serde_json::to_string(&HighScoreFile { high_score: score }).map_err(|source| {
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

// ── In-memory store ───────────────────────────────────────────────────────────

/// Store without durability; counts writes so callers can observe
/// write-through behaviour.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub value: Option<u32>,
    pub writes: usize,
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.value)
    }

    fn write(&mut self, score: u32) -> Result<(), StoreError> {
        self.value = Some(score);
        self.writes += 1;
        Ok(())
    }
}

// ── Tracker ───────────────────────────────────────────────────────────────────

/// The all-time best score plus the store it is written through to.
#[derive(Debug)]
pub struct HighScore<S: HighScoreStore> {
    best: u32,
    store: S,
}

impl<S: HighScoreStore> HighScore<S> {
    /// Read the persisted value once. Absent or unreadable → 0.
    pub fn load(store: S) -> Self {
        let best = match store.read() {
            Ok(value) => value.unwrap_or(0),
            Err(e) => {
                log::warn!("{e}; starting from a high score of 0");
                0
            }
        };
        Self { best, store }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Raise the best score if `score` beats it, writing through
    /// immediately. Returns true when the best changed.
    pub fn record(&mut self, score: u32) -> bool {
        if score <= self.best {
            return false;
        }
        self.best = score;
        if let Err(e) = self.store.write(score) {
            log::warn!("{e}; high score not saved");
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
