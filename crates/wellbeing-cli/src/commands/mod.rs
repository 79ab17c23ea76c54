pub mod config;
pub mod entry;
pub mod reminder;
pub mod trend;

use wellbeing_core::{Config, CoreError};

/// Whether to print JSON: explicit flag, else the configured default.
pub(crate) fn wants_json(flag: bool) -> bool {
    flag || Config::load_or_default().display.json
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CoreError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
