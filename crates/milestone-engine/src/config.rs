//! Configuration for the milestone viewer.
//!
//! The config file is JSON. Every field is optional; missing fields take
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogError};

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Catalog file to load instead of the built-in timeline.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Input poll interval for the TUI, in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Tracing filter used when `MILESTONE_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Glyph set for markers and controls.
    #[serde(default)]
    pub icons: IconStyle,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_log_filter() -> String {
    "info".into()
}

/// Glyph set for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    /// Unicode symbols.
    #[default]
    Unicode,
    /// ASCII only.
    Ascii,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration if the file exists, otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Load the configured catalog, or the built-in one when none is set.
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            tick_rate_ms: default_tick_rate_ms(),
            log_filter: default_log_filter(),
            icons: IconStyle::default(),
        }
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.catalog.is_none());
        assert_eq!(config.tick_rate_ms, 250);
        assert_eq!(config.log_filter, "info");
        assert_eq!(config.icons, IconStyle::Unicode);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"icons":"ascii"}"#).unwrap();
        assert_eq!(config.icons, IconStyle::Ascii);
        assert_eq!(config.tick_rate_ms, 250);
        assert!(config.catalog.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".milestone").join("config.json");

        let config = Config {
            catalog: Some(PathBuf::from("events.json")),
            tick_rate_ms: 100,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_default_missing() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_catalog_builtin_and_file() {
        let config = Config::default();
        assert_eq!(config.load_catalog().unwrap().len(), 4);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(
            &path,
            r#"{"events":[{"id":1,"year":"1970","title":"Only","description":""}]}"#,
        )
        .unwrap();

        let config = Config {
            catalog: Some(path),
            ..Default::default()
        };
        let catalog = config.load_catalog().unwrap();
        assert_eq!(catalog.len(), 1);
    }
}
