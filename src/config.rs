//! Application configuration: `config.json` in the app config directory,
//! then environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::storage::local_storage::default_storage_dir;

pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the demo REST service
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://jsonplaceholder.typicode.com".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,

    /// Where local storage lives. Defaults to the platform config dir.
    pub storage_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load `config.json` from the default directory (if present) and apply
    /// `RPG_DASHBOARD_*` environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&default_storage_dir().join(CONFIG_FILE))?;
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    /// A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RPG_DASHBOARD_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup("RPG_DASHBOARD_API_TIMEOUT_SECS") {
            self.api.timeout_secs = secs
                .parse()
                .context("RPG_DASHBOARD_API_TIMEOUT_SECS must be a whole number of seconds")?;
        }
        if let Some(dir) = lookup("RPG_DASHBOARD_STORAGE_DIR") {
            self.storage_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    pub fn storage_dir(&self) -> PathBuf {
        self.storage_dir.clone().unwrap_or_else(default_storage_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{"api": {"base_url": "http://localhost:3000"}}"#).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.storage_dir, None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "nope").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn environment_overrides_win() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("RPG_DASHBOARD_API_URL", "http://127.0.0.1:9000"),
            ("RPG_DASHBOARD_API_TIMEOUT_SECS", "3"),
            ("RPG_DASHBOARD_STORAGE_DIR", "/tmp/rpg"),
        ]);

        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout_secs, 3);
        assert_eq!(config.storage_dir(), PathBuf::from("/tmp/rpg"));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == "RPG_DASHBOARD_API_TIMEOUT_SECS").then(|| "soon".into()))
            .unwrap_err();
        assert!(err.to_string().contains("RPG_DASHBOARD_API_TIMEOUT_SECS"));
    }
}
