//! TOML-based application configuration.
//!
//! Stores planning defaults used when a command does not specify them:
//! - Participant count, experience level and start time
//! - Room template and available assets
//! - Question timing defaults for "opening + questions" blocks
//! - An optional custom exercise catalog
//!
//! Configuration is stored at `~/.config/trainroom/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::catalog::Catalog;
use crate::clock::ClockTime;
use crate::error::{CatalogError, ConfigError};
use crate::model::{ExperienceLevel, QuestionConfig, RoomAssets, RoomLayout, RoomTemplate};

/// Planning defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_participant_count")]
    pub participant_count: u32,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default = "default_start_time")]
    pub start_time: ClockTime,
    #[serde(default)]
    pub room_template: RoomTemplate,
    #[serde(default = "default_true")]
    pub has_tables: bool,
    #[serde(default = "default_flipchart_count")]
    pub flipchart_count: u32,
    #[serde(default = "default_true")]
    pub has_screen: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/trainroom/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub questions: QuestionConfig,
    /// Path to a TOML exercise catalog replacing the built-in one.
    #[serde(default)]
    pub catalog_path: Option<String>,
}

// Default functions
fn default_participant_count() -> u32 {
    12
}
fn default_start_time() -> ClockTime {
    ClockTime::from_hm(9, 0).unwrap_or_default()
}
fn default_true() -> bool {
    true
}
fn default_flipchart_count() -> u32 {
    1
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            participant_count: default_participant_count(),
            experience_level: ExperienceLevel::default(),
            start_time: default_start_time(),
            room_template: RoomTemplate::default(),
            has_tables: true,
            flipchart_count: default_flipchart_count(),
            has_screen: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig::default(),
            questions: QuestionConfig::default(),
            catalog_path: None,
        }
    }
}

impl DefaultsConfig {
    /// Room layout built from the configured template and assets.
    pub fn room(&self) -> RoomLayout {
        RoomLayout::new(
            self.room_template,
            RoomAssets {
                has_tables: self.has_tables,
                flipchart_count: self.flipchart_count,
                has_screen: self.has_screen,
            },
        )
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            value
                                .parse::<f64>()
                                .ok()
                                .and_then(serde_json::Number::from_f64)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory is unavailable.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing the defaults there if it is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed or the defaults cannot be written.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(_) => {
                tracing::debug!(path = %path.display(), "writing default config");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key.
    ///
    /// The new value must deserialize back into a valid config, so an
    /// unknown experience level or a malformed start time is rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value is invalid.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a config value by key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)?;
        self.save()
    }

    /// The exercise catalog to plan with.
    ///
    /// # Errors
    ///
    /// Returns an error if a custom catalog is configured but cannot be loaded.
    pub fn catalog(&self) -> Result<Catalog, CatalogError> {
        match self.catalog_path.as_deref() {
            Some(path) if !path.is_empty() => Catalog::load(Path::new(path)),
            _ => Ok(Catalog::builtin()),
        }
    }
}
