//! # Wellbeing Core Library
//!
//! Business logic for a single-user wellbeing journal: one entry per day
//! with sleep quality, muscle soreness, mood, training load and notes.
//! The `wellbeing` CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Readiness**: pure 0-100 score plus traffic-light tier per entry
//! - **Bands**: every rating-to-text table in one place
//! - **Guard**: advisory one-entry-per-day check used by create and edit
//! - **Journal**: create/edit/delete flows wiring the guard to the store
//! - **Storage**: SQLite entry store and TOML configuration
//! - **Trend**: chronological series for chart views
//!
//! ## Key Components
//!
//! - [`compute_readiness`]: score, tier and label for an entry
//! - [`find_conflict`]: same-day lookup with self-exclusion
//! - [`Journal`]: the write paths
//! - [`Database`]: SQLite implementation of [`EntryStore`]
//! - [`Config`]: application configuration management

pub mod bands;
pub mod calendar;
pub mod entry;
pub mod error;
pub mod guard;
pub mod journal;
pub mod readiness;
pub mod storage;
pub mod trend;

pub use bands::{Metric, Tier};
pub use entry::{Entry, EntryChanges, EntryDraft, EntryId, Rating};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use guard::{ensure_available, find_conflict, find_conflict_in_store};
pub use journal::{EditSession, EntrySummary, Journal};
pub use readiness::{compute_readiness, readiness_score, Readiness};
pub use storage::{Config, Database, EntryStore};
pub use trend::{build_trend, Trend, TrendPoint, MAX_WINDOW_DAYS};
