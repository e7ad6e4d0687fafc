//! High score persistence
//!
//! Only one number survives between sessions: the best whole score. Stores
//! are best-effort; a failed read yields 0 and a failed write is logged and
//! otherwise ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Load/save interface for the persisted high score
pub trait HighScoreStore {
    /// Stored value, or 0 when absent or unreadable
    fn load(&mut self) -> u64;
    /// Persist a new value. Failures must not propagate.
    fn save(&mut self, high_score: u64);
}

/// Keeps the score in memory only (tests, headless runs without a file)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub value: Option<u64>,
    /// Number of save calls, handy for assertions
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            saves: 0,
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u64 {
        self.value.unwrap_or(0)
    }

    fn save(&mut self, high_score: u64) {
        self.value = Some(high_score);
        self.saves += 1;
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("high score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high score file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// On-disk record
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScoreRecord {
    pub high_score: u64,
}

/// JSON file store for native builds
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

    pub fn read(&self) -> Result<HighScoreRecord, StoreError> {
        let text = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write via a temp file so a crash mid-write leaves the old record intact
    pub fn write(&self, record: HighScoreRecord) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&record)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> u64 {
        match self.read() {
            Ok(record) => {
                log::info!("Loaded high score {} from {}", record.high_score, self.path.display());
                record.high_score
            }
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No high score file, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring high score file {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save(&mut self, high_score: u64) {
        match self.write(HighScoreRecord { high_score }) {
            Ok(()) => log::info!("High score {} saved", high_score),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

/// Browser LocalStorage store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// LocalStorage key; the value is the plain decimal number
    const STORAGE_KEY: &'static str = "flip_high";

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl HighScoreStore for LocalStorageStore {
    fn load(&mut self) -> u64 {
        let stored = Self::storage().and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        match stored.map(|text| parse_stored_score(&text)) {
            Some(score) => {
                log::info!("Loaded high score {}", score);
                score
            }
            None => {
                log::info!("No high score found, starting fresh");
                0
            }
        }
    }

    fn save(&mut self, high_score: u64) {
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, high score {} not saved", high_score);
            return;
        };
        match storage.set_item(Self::STORAGE_KEY, &high_score.to_string()) {
            Ok(()) => log::info!("High score {} saved", high_score),
            Err(e) => log::warn!("Failed to save high score {}: {:?}", high_score, e),
        }
    }
}

/// Parse a stored score string leniently: blanks, junk and negatives are 0,
/// fractional values are floored.
pub fn parse_stored_score(text: &str) -> u64 {
    let text = text.trim();
    if let Ok(n) = text.parse::<u64>() {
        return n;
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n.floor() as u64,
        _ => 0,
    }
}
