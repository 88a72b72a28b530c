//! Configuration for the organizer: the similarity threshold, a storage path
//! used by the serialization boundary, and the logging level the ambient CLI
//! initializes its subscriber with.
//!
//! Loaded the way the teacher's configuration layer loads: a TOML file under
//! the platform config directory, with environment variable overrides and an
//! in-code default when no file exists.

use crate::error::{Error, Result};
use crate::graph::DEFAULT_SIMILARITY_THRESHOLD;
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the config file path directly.
const ENV_CONFIG_PATH: &str = "WEBDOCS_CONFIG";
/// Environment variable overriding the similarity threshold.
const ENV_SIMILARITY_THRESHOLD: &str = "WEBDOCS_SIMILARITY_THRESHOLD";
/// Environment variable overriding the storage path.
const ENV_STORAGE_PATH: &str = "WEBDOCS_STORAGE_PATH";
/// Environment variable overriding the log level.
const ENV_LOG_LEVEL: &str = "WEBDOCS_LOG_LEVEL";

/// Top-level organizer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizerConfig {
    /// Jaccard similarity at or above which two documents are related.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Where the CLI's serialize/load commands read and write the persisted
    /// collection by default.
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// Level passed to the ambient CLI's `tracing-subscriber` initialization.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_storage_path() -> PathBuf {
    BaseDirs::new().map_or_else(
        || PathBuf::from("webdocs-collection.json"),
        |base| base.home_dir().join(".webdocs").join("collection.json"),
    )
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
            storage_path: default_storage_path(),
            log_level: default_log_level(),
        }
    }
}

impl OrganizerConfig {
    /// Load configuration from the default location, or return defaults if no
    /// file exists. Environment variables are applied after the file, so they
    /// always take precedence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a config file exists but cannot be read or
    /// contains invalid TOML.
    pub fn load() -> Result<Self> {
        let mut config = match Self::existing_config_path() {
            Some(path) => {
                let content = fs::read_to_string(&path)
                    .map_err(|e| Error::Config(format!("failed to read config: {e}")))?;
                toml::from_str(&content)?
            },
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Persist this configuration to the default location, creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the config directory cannot be determined
    /// or the file cannot be written, or [`Error::Io`] on a filesystem error.
    pub fn save(&self) -> Result<()> {
        let path = Self::canonical_config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn canonical_config_path() -> Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            if !xdg.trim().is_empty() {
                return Ok(PathBuf::from(xdg).join("webdocs").join("config.toml"));
            }
        }
        BaseDirs::new()
            .map(|base| base.home_dir().join(".webdocs").join("config.toml"))
            .ok_or_else(|| Error::Config("failed to determine config directory".into()))
    }

    fn existing_config_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(ENV_CONFIG_PATH) {
            let path = PathBuf::from(explicit);
            if path.exists() {
                return Some(path);
            }
        }
        Self::canonical_config_path()
            .ok()
            .filter(|p| p.exists())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var(ENV_SIMILARITY_THRESHOLD) {
            if let Ok(parsed) = v.parse() {
                self.similarity_threshold = parsed;
            }
        }
        if let Ok(v) = std::env::var(ENV_STORAGE_PATH) {
            if !v.trim().is_empty() {
                self.storage_path = PathBuf::from(v);
            }
        }
        if let Ok(v) = std::env::var(ENV_LOG_LEVEL) {
            if !v.trim().is_empty() {
                self.log_level = v;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_documented_similarity_threshold() {
        let config = OrganizerConfig::default();
        assert!((config.similarity_threshold - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn round_trips_through_toml() {
        let config = OrganizerConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let back: OrganizerConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(config, back);
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let parsed: OrganizerConfig = toml::from_str("").expect("empty toml is valid");
        assert_eq!(parsed, OrganizerConfig::default());
    }
}
