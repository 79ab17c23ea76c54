//! Duplicate-date detection.
//!
//! One entry per calendar day is an application-level rule only: the check
//! is a point-in-time read and the store carries no uniqueness constraint, so
//! two racing writers can both pass it.

use chrono::NaiveDateTime;

use crate::calendar::day_bounds;
use crate::entry::Entry;
use crate::error::{CoreError, Result};
use crate::storage::EntryStore;

/// First entry on the same calendar day as `candidate`, ignoring `exclude_id`.
pub fn find_conflict<'a, I>(
    candidate: NaiveDateTime,
    entries: I,
    exclude_id: Option<&str>,
) -> Option<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let (start, end) = day_bounds(candidate);
    entries
        .into_iter()
        .filter(|e| e.date >= start && e.date < end)
        .find(|e| Some(e.id.as_str()) != exclude_id)
}

/// Like [`find_conflict`], turning a match into [`CoreError::DuplicateDate`].
pub fn ensure_available<'a, I>(
    candidate: NaiveDateTime,
    entries: I,
    exclude_id: Option<&str>,
) -> Result<()>
where
    I: IntoIterator<Item = &'a Entry>,
{
    match find_conflict(candidate, entries, exclude_id) {
        Some(existing) => Err(conflict_error(existing)),
        None => Ok(()),
    }
}

/// Store-backed check that only loads the candidate's day.
pub fn find_conflict_in_store<S: EntryStore + ?Sized>(
    store: &S,
    candidate: NaiveDateTime,
    exclude_id: Option<&str>,
) -> Result<Option<Entry>> {
    let (start, end) = day_bounds(candidate);
    let same_day = store.entries_between(start, end)?;
    Ok(find_conflict(candidate, &same_day, exclude_id).cloned())
}

pub(crate) fn conflict_error(existing: &Entry) -> CoreError {
    CoreError::DuplicateDate {
        existing_id: existing.id.clone(),
        day: existing.date.date(),
    }
}
