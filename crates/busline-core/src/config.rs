//! Event bus configuration
//!
//! Settings can be built in code or loaded from a `.json` or `.toml` file.
//! Every field has a default, so a config file only needs the keys it changes:
//!
//! ```toml
//! prune_empty_keys = true
//! max_listeners_per_key = 32
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the event bus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Drop a key from the registry once its last listener is removed.
    pub prune_empty_keys: bool,
    /// Warn when a single key holds more listeners than this. Registration
    /// still succeeds; the warning points at a likely listener leak.
    pub max_listeners_per_key: Option<usize>,
    /// Log every listener invocation at TRACE level.
    pub trace_dispatch: bool,
}

impl EventBusConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParse {
                    format: "JSON",
                    reason: e.to_string(),
                })?
            }
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParse {
                format: "TOML",
                reason: e.to_string(),
            })?,
        };

        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "Loaded event bus config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| Error::ConfigSerialize {
                    reason: e.to_string(),
                })?
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| Error::ConfigSerialize {
                    reason: e.to_string(),
                })?
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_listeners_per_key == Some(0) {
            return Err(Error::InvalidConfig {
                reason: "max_listeners_per_key must be > 0".to_string(),
            });
        }
        Ok(())
    }
}

enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(ConfigFormat::Json),
            Some("toml") => Ok(ConfigFormat::Toml),
            _ => Err(Error::UnsupportedConfigFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = EventBusConfig::new();
        assert!(!config.prune_empty_keys);
        assert_eq!(config.max_listeners_per_key, None);
        assert!(!config.trace_dispatch);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bus.toml");
        std::fs::write(&path, "prune_empty_keys = true\n").unwrap();

        let config = EventBusConfig::load_from_file(&path).unwrap();
        assert!(config.prune_empty_keys);
        assert_eq!(config.max_listeners_per_key, None);
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bus.json");
        std::fs::write(&path, r#"{"max_listeners_per_key": 4, "trace_dispatch": true}"#)
            .unwrap();

        let config = EventBusConfig::load_from_file(&path).unwrap();
        assert_eq!(config.max_listeners_per_key, Some(4));
        assert!(config.trace_dispatch);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let config = EventBusConfig {
            prune_empty_keys: true,
            max_listeners_per_key: Some(8),
            trace_dispatch: false,
        };

        for name in ["bus.toml", "bus.json"] {
            let path = dir.path().join(name);
            config.save_to_file(&path).unwrap();
            assert_eq!(EventBusConfig::load_from_file(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_rejects_zero_listener_limit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bus.toml");
        std::fs::write(&path, "max_listeners_per_key = 0\n").unwrap();

        let err = EventBusConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bus.yaml");
        std::fs::write(&path, "prune_empty_keys: true\n").unwrap();

        let err = EventBusConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedConfigFormat { .. }));
    }

    #[test]
    fn test_malformed_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bus.toml");
        std::fs::write(&path, "prune_empty_keys = \"yes\"\n").unwrap();

        let err = EventBusConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { format: "TOML", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = EventBusConfig::load_from_file(Path::new("/nonexistent/bus.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
