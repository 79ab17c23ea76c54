//! The journal entry record and its bounded ratings.

use std::fmt;

use chrono::{Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Unique identifier for an entry.
pub type EntryId = String;

/// A subjective 1-10 rating.
///
/// Construction is the only validation point: a `Rating` held anywhere in the
/// crate is always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// Validate `value` as a rating for the named field.
    pub fn for_field(field: &str, value: i64) -> Result<Self, ValidationError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
        }
    }

    pub fn new(value: u8) -> Result<Self, ValidationError> {
        Self::for_field("rating", i64::from(value))
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::for_field("rating", value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

/// One day's recorded wellbeing metrics.
///
/// `date` is local wall-clock time; only its calendar day is meaningful.
/// Score and label are never stored here, see [`crate::readiness`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    pub date: NaiveDateTime,
    pub sleep_quality: Rating,
    /// Higher is worse.
    pub muscle_soreness: Rating,
    pub mood: Rating,
    /// Informational only, not part of the readiness score.
    pub training_load: Rating,
    pub notes: String,
}

impl Entry {
    /// Validate a draft and assign it a fresh id.
    ///
    /// The date is cut to whole seconds, the precision the store keeps.
    pub fn from_draft(draft: EntryDraft) -> Result<Self, ValidationError> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            date: draft.date.trunc_subsecs(0),
            sleep_quality: Rating::for_field("sleep_quality", draft.sleep_quality)?,
            muscle_soreness: Rating::for_field("muscle_soreness", draft.muscle_soreness)?,
            mood: Rating::for_field("mood", draft.mood)?,
            training_load: Rating::for_field("training_load", draft.training_load)?,
            notes: draft.notes,
        })
    }

    /// First line of the notes, for one-row listings.
    pub fn notes_preview(&self) -> Option<&str> {
        self.notes
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
    }
}

/// Unvalidated values collected by the add form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub date: NaiveDateTime,
    pub sleep_quality: i64,
    pub muscle_soreness: i64,
    pub mood: i64,
    pub training_load: i64,
    pub notes: String,
}

impl Default for EntryDraft {
    fn default() -> Self {
        Self {
            date: Local::now().naive_local(),
            sleep_quality: 7,
            muscle_soreness: 2,
            mood: 7,
            training_load: 5,
            notes: String::new(),
        }
    }
}

/// Field changes requested by the edit form. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryChanges {
    pub date: Option<NaiveDateTime>,
    pub sleep_quality: Option<i64>,
    pub muscle_soreness: Option<i64>,
    pub mood: Option<i64>,
    pub training_load: Option<i64>,
    pub notes: Option<String>,
}

impl EntryChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply every change except `date`, validating ratings first so a
    /// rejected change leaves `entry` untouched.
    ///
    /// The date goes through the duplicate check and is applied separately.
    pub fn apply_fields(&self, entry: &mut Entry) -> Result<(), ValidationError> {
        let rate = |field: &str, value: Option<i64>| {
            value.map(|v| Rating::for_field(field, v)).transpose()
        };
        let sleep_quality = rate("sleep_quality", self.sleep_quality)?;
        let muscle_soreness = rate("muscle_soreness", self.muscle_soreness)?;
        let mood = rate("mood", self.mood)?;
        let training_load = rate("training_load", self.training_load)?;

        if let Some(r) = sleep_quality {
            entry.sleep_quality = r;
        }
        if let Some(r) = muscle_soreness {
            entry.muscle_soreness = r;
        }
        if let Some(r) = mood {
            entry.mood = r;
        }
        if let Some(r) = training_load {
            entry.training_load = r;
        }
        if let Some(ref notes) = self.notes {
            entry.notes = notes.clone();
        }
        Ok(())
    }
}
