//! Configuration module for tagbase
//!
//! Manages the store location and display defaults.
//! Configuration is stored in the user's config directory
//! (`~/.config/tagbase/config.toml` on Linux).

use crate::db::RepositoryOptions;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Path display format
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathFormat {
    /// Display absolute paths
    #[default]
    Absolute,
    /// Display relative paths (relative to current directory)
    Relative,
}

const fn default_true() -> bool {
    true
}

const fn default_busy_timeout_ms() -> u64 {
    5000
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TagbaseConfig {
    /// Store file; the user data directory is used when unset
    #[serde(default)]
    pub database: Option<PathBuf>,

    /// Suppress informational output by default
    #[serde(default)]
    pub quiet: bool,

    /// Default format for displaying paths (absolute or relative)
    #[serde(default)]
    pub path_format: PathFormat,

    /// Enforce foreign keys between taggings, files and tags
    #[serde(default = "default_true")]
    pub foreign_keys: bool,

    /// How long to wait for a lock held by another process
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for TagbaseConfig {
    fn default() -> Self {
        Self {
            database: None,
            quiet: false,
            path_format: PathFormat::default(),
            foreign_keys: default_true(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl TagbaseConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("tagbase").join("config.toml"))
    }

    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit file, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Store file to open, falling back to the user data directory
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no path is configured and the data directory
    /// cannot be determined.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.database {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))?;
        Ok(data_dir.join("tagbase").join("tagbase.db"))
    }

    #[must_use]
    pub const fn repository_options(&self) -> RepositoryOptions {
        RepositoryOptions {
            foreign_keys: self.foreign_keys,
            busy_timeout: Duration::from_millis(self.busy_timeout_ms),
        }
    }

    /// Set a value by key, as given on the command line
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is unknown or the value does not parse.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_bool = |value: &str| {
            value.parse::<bool>().map_err(|_| {
                ConfigError::Message(format!(
                    "Invalid value for {key}: '{value}'. Use 'true' or 'false'"
                ))
            })
        };

        match key {
            "database" => self.database = Some(PathBuf::from(value)),
            "quiet" => self.quiet = parse_bool(value)?,
            "foreign_keys" => self.foreign_keys = parse_bool(value)?,
            "path_format" => {
                self.path_format = match value {
                    "absolute" => PathFormat::Absolute,
                    "relative" => PathFormat::Relative,
                    _ => {
                        return Err(ConfigError::Message(format!(
                            "Invalid value for path_format: '{value}'. Use 'absolute' or 'relative'"
                        )));
                    }
                }
            }
            "busy_timeout_ms" => {
                self.busy_timeout_ms = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for busy_timeout_ms: '{value}'"))
                })?;
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Get a value by key, formatted for display
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the key is unknown.
    pub fn get_value(&self, key: &str) -> Result<String, ConfigError> {
        Ok(match key {
            "database" => self
                .database_path()
                .map(|p| p.display().to_string())?,
            "quiet" => self.quiet.to_string(),
            "foreign_keys" => self.foreign_keys.to_string(),
            "path_format" => match self.path_format {
                PathFormat::Absolute => "absolute".to_string(),
                PathFormat::Relative => "relative".to_string(),
            },
            "busy_timeout_ms" => self.busy_timeout_ms.to_string(),
            _ => return Err(unknown_key(key)),
        })
    }
}

fn unknown_key(key: &str) -> ConfigError {
    ConfigError::Message(format!(
        "Unknown configuration key: '{key}'. Available keys: database, quiet, path_format, foreign_keys, busy_timeout_ms"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TagbaseConfig::default();
        assert!(config.database.is_none());
        assert!(!config.quiet);
        assert!(config.foreign_keys);
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(config.path_format, PathFormat::Absolute);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tagbase").join("config.toml");

        let config = TagbaseConfig::load_from(&path).unwrap();
        assert_eq!(config, TagbaseConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TagbaseConfig::default();
        config.database = Some(PathBuf::from("/tmp/tags.db"));
        config.quiet = true;
        config.path_format = PathFormat::Relative;
        config.foreign_keys = false;
        config.save_to(&path).unwrap();

        let loaded = TagbaseConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "quiet = true\n").unwrap();

        let loaded = TagbaseConfig::load_from(&path).unwrap();
        assert!(loaded.quiet);
        assert!(loaded.foreign_keys);
        assert_eq!(loaded.busy_timeout_ms, 5000);
    }

    #[test]
    fn test_database_path_prefers_configured() {
        let config = TagbaseConfig {
            database: Some(PathBuf::from("/srv/tags.db")),
            ..TagbaseConfig::default()
        };
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/srv/tags.db"));
    }

    #[test]
    fn test_repository_options() {
        let config = TagbaseConfig {
            foreign_keys: false,
            busy_timeout_ms: 250,
            ..TagbaseConfig::default()
        };
        let options = config.repository_options();
        assert!(!options.foreign_keys);
        assert_eq!(options.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_set_and_get_value() {
        let mut config = TagbaseConfig::default();
        config.set_value("quiet", "true").unwrap();
        config.set_value("path_format", "relative").unwrap();
        config.set_value("database", "/tmp/x.db").unwrap();

        assert_eq!(config.get_value("quiet").unwrap(), "true");
        assert_eq!(config.get_value("path_format").unwrap(), "relative");
        assert_eq!(config.get_value("database").unwrap(), "/tmp/x.db");
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = TagbaseConfig::default();
        assert!(config.set_value("quiet", "maybe").is_err());
        assert!(config.set_value("path_format", "sideways").is_err());
        assert!(config.set_value("colour", "blue").is_err());
        assert!(config.get_value("colour").is_err());
    }
}
