//! Key-value persistence for the player record.
//!
//! The whole `PlayerStats` snapshot is stored as one JSON document under
//! [`STATS_KEY`]. Reads never fail from the caller's point of view: a missing
//! or corrupt record means "no prior state".

use crate::error::{Result, TrainerError};
use crate::stats::PlayerStats;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Storage key of the player record
pub const STATS_KEY: &str = "mathtrainer_v2";

/// Minimal durable key-value store
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Store keeping one file per key under a directory
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(TrainerError::Storage(format!("invalid key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Write via temp file + rename so a crash never leaves half a record
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| TrainerError::Storage("memory store poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Load the player record, falling back to defaults on any failure
pub fn load_stats(store: &dyn KeyValueStore) -> PlayerStats {
    let raw = match store.get(STATS_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("no stored player record, starting fresh");
            return PlayerStats::default();
        }
        Err(e) => {
            warn!("failed to read player record ({}): {}", e.kind(), e);
            return PlayerStats::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(stats) => stats,
        Err(e) => {
            warn!("discarding corrupt player record: {}", e);
            PlayerStats::default()
        }
    }
}

/// Persist the player record
pub fn save_stats(store: &dyn KeyValueStore, stats: &PlayerStats) -> Result<()> {
    let json = serde_json::to_string(stats)?;
    store.set(STATS_KEY, &json)
}

/// Remove the player record entirely
pub fn clear_stats(store: &dyn KeyValueStore) -> Result<()> {
    store.remove(STATS_KEY)
}
