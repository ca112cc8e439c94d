//! # Configuration
//!
//! Settings live in `config.json` inside the storage directory, next to the
//! persisted preferences and favorites. A missing file means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | unset (`./data`) | Directory holding `spots.json` and `malls.json` |
//! | `color` | `true` | Styled terminal output |
//!
//! View preferences (columns, page size) are *not* configuration: they are
//! user state managed by [`crate::prefs`].

use crate::error::{Result, SpotsError};
use crate::store::fs_backend::FsBackend;
use crate::store::StorageBackend;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Stored as `config.json` next to preferences and favorites.
const CONFIG_KEY: &str = "config";

pub const CONFIG_KEYS: &[&str] = &["data_dir", "color"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpotsConfig {
    /// Catalog directory. Relative paths resolve against the working directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for SpotsConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            color: default_color(),
        }
    }
}

impl SpotsConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let Some(content) = FsBackend::new(config_dir.as_ref()).read(CONFIG_KEY)? else {
            return Ok(Self::default());
        };
        let config: SpotsConfig =
            serde_json::from_str(&content).map_err(SpotsError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory, replacing the file atomically
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(SpotsError::Serialization)?;
        FsBackend::new(config_dir.as_ref()).write(CONFIG_KEY, &content)
    }

    /// Display value of a key, or None for unknown keys.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => Some(
                self.data_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "color" => Some(self.color.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "data_dir" => {
                let value = value.trim();
                self.data_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "color" => {
                self.color = match value.trim() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(SpotsError::Config(format!(
                            "Invalid value for color: {}",
                            other
                        )))
                    }
                };
            }
            other => return Err(SpotsError::Config(format!("Unknown config key: {}", other))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SpotsConfig::default();
        assert_eq!(config.data_dir, None);
        assert!(config.color);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = tempfile::tempdir().unwrap();
        let config = SpotsConfig::load(temp.path()).unwrap();
        assert_eq!(config, SpotsConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("home");

        let mut config = SpotsConfig::default();
        config.set("data_dir", "/srv/catalog").unwrap();
        config.set("color", "off").unwrap();
        config.save(&dir).unwrap();

        let loaded = SpotsConfig::load(&dir).unwrap();
        assert_eq!(loaded.data_dir, Some(PathBuf::from("/srv/catalog")));
        assert!(!loaded.color);
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path();

        SpotsConfig::default().save(dir).unwrap();
        let mut config = SpotsConfig::default();
        config.set("color", "no").unwrap();
        config.save(dir).unwrap();

        let files: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files, vec!["config.json".to_string()]);
        assert!(!SpotsConfig::load(dir).unwrap().color);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("config.json"), "{}").unwrap();
        assert_eq!(SpotsConfig::load(temp.path()).unwrap(), SpotsConfig::default());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("config.json"), "{nope").unwrap();
        assert!(matches!(
            SpotsConfig::load(temp.path()),
            Err(SpotsError::Serialization(_))
        ));
    }

    #[test]
    fn test_get_and_set_keys() {
        let mut config = SpotsConfig::default();
        assert_eq!(config.get("data_dir").as_deref(), Some(""));
        assert_eq!(config.get("color").as_deref(), Some("true"));
        assert_eq!(config.get("nope"), None);

        config.set("data_dir", "catalog").unwrap();
        assert_eq!(config.get("data_dir").as_deref(), Some("catalog"));
        config.set("data_dir", "").unwrap();
        assert_eq!(config.data_dir, None);

        assert!(config.set("color", "sometimes").is_err());
        assert!(config.set("nope", "x").is_err());
    }
}
