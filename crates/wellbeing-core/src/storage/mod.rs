mod config;
pub mod database;
pub mod migrations;

pub use config::{Config, DisplayConfig, ReminderConfig, TrendConfig};
pub use database::Database;

use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::entry::Entry;
use crate::error::{ConfigError, Result};

/// Persistence boundary for journal entries.
///
/// Implementations only store and fetch; the one-entry-per-day rule is
/// checked by [`crate::guard`] before writes reach the store.
pub trait EntryStore {
    fn insert(&self, entry: &Entry) -> Result<()>;

    /// Overwrite every field of an existing entry.
    ///
    /// Returns [`crate::CoreError::NotFound`] if no entry has `entry.id`.
    fn update(&self, entry: &Entry) -> Result<()>;

    /// Returns [`crate::CoreError::NotFound`] if no entry has `id`.
    fn delete(&self, id: &str) -> Result<()>;

    fn get(&self, id: &str) -> Result<Option<Entry>>;

    /// All entries, oldest first.
    fn list_all(&self) -> Result<Vec<Entry>>;

    /// Entries with `start <= date < end`, oldest first.
    fn entries_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Entry>>;
}

/// Returns the data directory.
///
/// `WELLBEING_DATA_DIR` wins if set. Otherwise `~/.config/wellbeing[-dev]/`,
/// where `WELLBEING_ENV=dev` selects the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("WELLBEING_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("WELLBEING_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("wellbeing-dev")
            } else {
                base_dir.join("wellbeing")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
