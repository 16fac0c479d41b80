use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const STORAGE_FILE: &str = "local_storage.json";

/// Small string key/value store persisted as one JSON file.
///
/// Every call goes to disk, so clones pointing at the same directory see
/// each other's writes.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

/// Default location: `<config dir>/rpg_dashboard`.
pub fn default_storage_dir() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("rpg_dashboard");
    path
}

impl LocalStorage {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("creating storage directory {}", dir.display()))?;

        Ok(Self {
            path: dir.join(STORAGE_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    pub fn set(&self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.into());
        self.save(&entries)
    }

    /// Returns the removed value, if there was one.
    pub fn remove(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.load();
        let removed = entries.remove(key);
        if removed.is_some() {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    // A missing or unreadable file is treated as empty storage.
    fn load(&self) -> BTreeMap<String, String> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        if let Err(err) = fs::write(&self.path, json) {
            tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to write local storage"
            );
            return Err(err).with_context(|| format!("writing {}", self.path.display()));
        }
        Ok(())
    }
}
