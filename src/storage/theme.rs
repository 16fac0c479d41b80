use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::storage::local_storage::LocalStorage;

pub const THEME_KEY: &str = "rpg-theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

/// The one flag that survives a restart. Read once when loaded, written on
/// every toggle.
#[derive(Debug, Clone)]
pub struct ThemePreference {
    storage: LocalStorage,
    mode: ThemeMode,
}

impl ThemePreference {
    pub fn load(storage: LocalStorage) -> Self {
        let mode = match storage.get(THEME_KEY).as_deref() {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        };
        tracing::debug!(theme = mode.as_str(), "theme loaded");

        Self { storage, mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn toggle(&mut self) -> Result<ThemeMode> {
        let next = self.mode.toggled();
        self.storage.set(THEME_KEY, next.as_str())?;
        self.mode = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_light() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();

        assert_eq!(ThemePreference::load(storage.clone()).mode(), ThemeMode::Light);

        storage.set(THEME_KEY, "purple").unwrap();
        assert_eq!(ThemePreference::load(storage).mode(), ThemeMode::Light);
    }

    #[test]
    fn toggle_persists_across_reload() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::open(dir.path()).unwrap();

        let mut theme = ThemePreference::load(storage.clone());
        assert_eq!(theme.toggle().unwrap(), ThemeMode::Dark);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));

        let mut reloaded = ThemePreference::load(storage.clone());
        assert!(reloaded.is_dark());
        reloaded.toggle().unwrap();
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("light"));
    }
}
