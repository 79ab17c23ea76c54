//! TOML-based application configuration.
//!
//! Stores user preferences:
//! - Daily check-in reminder (enabled flag and time of day)
//! - Trend window length
//! - Listing display options
//!
//! Configuration is stored at `<data dir>/config.toml`.

use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::calendar::parse_clock_time;
use crate::error::{ConfigError, CoreError, Result};
use crate::trend::MAX_WINDOW_DAYS;

/// Daily check-in reminder preference.
///
/// Only the preference lives here; delivering the notification is up to the
/// host platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Local time of day, `HH:MM`.
    #[serde(default = "default_reminder_time")]
    pub time: String,
}

/// Trend view configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

/// Listing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_true")]
    pub show_notes: bool,
    /// Print JSON instead of text by default.
    #[serde(default)]
    pub json: bool,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reminder: ReminderConfig,
    #[serde(default)]
    pub trend: TrendConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_reminder_time() -> String {
    "08:00".into()
}
fn default_window_days() -> u32 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            time: default_reminder_time(),
        }
    }
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_notes: true,
            json: false,
        }
    }
}

impl ReminderConfig {
    /// Parsed reminder time.
    pub fn time_of_day(&self) -> Result<NaiveTime> {
        Ok(parse_clock_time(&self.time)?)
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
        if key.is_empty() {
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
                            .map_err(|e| invalid(format!("{e}")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) => return Err(unknown()),
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the data directory, writing defaults if no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Persist to the data directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "no config file, writing defaults");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values that parse as TOML but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_clock_time(&self.reminder.time).map_err(|e| ConfigError::InvalidValue {
            key: "reminder.time".into(),
            message: e.to_string(),
        })?;
        if !(1..=MAX_WINDOW_DAYS).contains(&self.trend.window_days) {
            return Err(ConfigError::InvalidValue {
                key: "trend.window_days".into(),
                message: format!("must be between 1 and {MAX_WINDOW_DAYS}"),
            });
        }
        Ok(())
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

    /// Set a value by dot-separated key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type or constraints. `self` is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load, falling back to defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e: CoreError| {
            tracing::warn!(error = %e, "could not load config, using defaults");
            Self::default()
        })
    }
}
