//! Create, edit and delete flows over an [`EntryStore`].
//!
//! Every write that sets a date runs the duplicate-date check first. The
//! check and the write are separate store calls with nothing held in between.

use chrono::{NaiveDate, NaiveDateTime, SubsecRound};
use serde::Serialize;

use crate::calendar::day_bounds;
use crate::entry::{Entry, EntryChanges, EntryDraft};
use crate::error::{CoreError, Result, ValidationError};
use crate::guard::{conflict_error, find_conflict, find_conflict_in_store};
use crate::readiness::{compute_readiness, Readiness};
use crate::storage::EntryStore;

/// An entry together with its derived readiness, for list views.
#[derive(Debug, Clone, Serialize)]
pub struct EntrySummary {
    #[serde(flatten)]
    pub entry: Entry,
    pub readiness: Readiness,
}

impl From<Entry> for EntrySummary {
    fn from(entry: Entry) -> Self {
        let readiness = compute_readiness(&entry);
        Self { entry, readiness }
    }
}

/// In-progress edit of one entry.
///
/// Tracks the last date that passed the duplicate check so a conflicting
/// date change can be rolled back immediately. Staying on the stored
/// calendar day never needs a check.
#[derive(Debug, Clone)]
pub struct EditSession {
    entry: Entry,
    stored_day: NaiveDate,
    last_valid_date: NaiveDateTime,
}

impl EditSession {
    pub fn new(entry: Entry) -> Self {
        let last_valid_date = entry.date;
        Self {
            stored_day: last_valid_date.date(),
            entry,
            last_valid_date,
        }
    }

    /// Whether the entry now sits on a different day than the stored one.
    pub fn moves_day(&self) -> bool {
        self.entry.date.date() != self.stored_day
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn last_valid_date(&self) -> NaiveDateTime {
        self.last_valid_date
    }

    /// Change the date, checking it against `others`.
    ///
    /// On conflict the date is reverted to the last valid one and
    /// [`CoreError::DuplicateDate`] is returned.
    pub fn set_date<'a, I>(&mut self, date: NaiveDateTime, others: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let date = date.trunc_subsecs(0);
        self.entry.date = date;
        if !self.moves_day() {
            self.last_valid_date = date;
            return Ok(());
        }
        match find_conflict(date, others, Some(self.entry.id.as_str())) {
            Some(existing) => {
                tracing::warn!(
                    entry = %self.entry.id,
                    conflicting = %existing.id,
                    day = %date.date(),
                    "date change rejected, reverting"
                );
                self.entry.date = self.last_valid_date;
                Err(conflict_error(existing))
            }
            None => {
                self.last_valid_date = date;
                Ok(())
            }
        }
    }

    /// Apply all non-date changes.
    pub fn apply(&mut self, changes: &EntryChanges) -> Result<(), ValidationError> {
        changes.apply_fields(&mut self.entry)
    }

    pub fn into_entry(self) -> Entry {
        self.entry
    }
}

/// Journal operations backed by a store.
pub struct Journal<S> {
    store: S,
}

impl<S: EntryStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and persist a new entry.
    ///
    /// # Errors
    /// [`CoreError::Validation`] for out-of-range ratings,
    /// [`CoreError::DuplicateDate`] if the day already has an entry.
    pub fn create(&self, draft: EntryDraft) -> Result<Entry> {
        let entry = Entry::from_draft(draft)?;
        if let Some(existing) = find_conflict_in_store(&self.store, entry.date, None)? {
            tracing::warn!(
                conflicting = %existing.id,
                day = %entry.date.date(),
                "rejected new entry for an occupied day"
            );
            return Err(conflict_error(&existing));
        }
        self.store.insert(&entry)?;
        tracing::info!(entry = %entry.id, day = %entry.date.date(), "created entry");
        Ok(entry)
    }

    pub fn get(&self, id: &str) -> Result<Entry> {
        self.store
            .get(id)?
            .ok_or_else(|| CoreError::NotFound { id: id.to_string() })
    }

    /// Start editing an existing entry.
    pub fn begin_edit(&self, id: &str) -> Result<EditSession> {
        Ok(EditSession::new(self.get(id)?))
    }

    /// Check a date change for a session against the stored entries.
    pub fn change_date(&self, session: &mut EditSession, date: NaiveDateTime) -> Result<()> {
        let (start, end) = day_bounds(date);
        let same_day = self.store.entries_between(start, end)?;
        session.set_date(date, &same_day)
    }

    /// Persist an edit session, re-checking the date if it moved to another day.
    pub fn commit(&self, session: EditSession) -> Result<Entry> {
        let moves_day = session.moves_day();
        let entry = session.into_entry();
        let conflict = if moves_day {
            find_conflict_in_store(&self.store, entry.date, Some(entry.id.as_str()))?
        } else {
            None
        };
        if let Some(existing) = conflict {
            tracing::warn!(
                entry = %entry.id,
                conflicting = %existing.id,
                "rejected edit, day became occupied"
            );
            return Err(conflict_error(&existing));
        }
        self.store.update(&entry)?;
        tracing::info!(entry = %entry.id, "updated entry");
        Ok(entry)
    }

    /// Apply `changes` to entry `id` in one step.
    ///
    /// Nothing is written if any change is rejected.
    pub fn edit(&self, id: &str, changes: &EntryChanges) -> Result<Entry> {
        let mut session = self.begin_edit(id)?;
        session.apply(changes)?;
        if let Some(date) = changes.date {
            self.change_date(&mut session, date)?;
        }
        self.commit(session)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.store.delete(id)?;
        tracing::info!(entry = %id, "deleted entry");
        Ok(())
    }

    /// All entries with readiness, newest first.
    pub fn list(&self) -> Result<Vec<EntrySummary>> {
        let mut entries = self.store.list_all()?;
        entries.reverse();
        Ok(entries.into_iter().map(EntrySummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bands::Tier;
    use crate::storage::Database;

    fn at(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn journal() -> Journal<Database> {
        Journal::new(Database::open_memory().unwrap())
    }

    fn draft(date: NaiveDateTime) -> EntryDraft {
        EntryDraft {
            date,
            ..Default::default()
        }
    }

    #[test]
    fn create_rejects_second_entry_same_day() {
        let journal = journal();
        let first = journal.create(draft(at(1, 9))).unwrap();
        match journal.create(draft(at(1, 21))) {
            Err(CoreError::DuplicateDate { existing_id, .. }) => assert_eq!(existing_id, first.id),
            other => panic!("expected duplicate, got {other:?}"),
        }
        assert_eq!(journal.store().list_all().unwrap().len(), 1);
    }

    #[test]
    fn create_rejects_out_of_range_ratings() {
        let journal = journal();
        let bad = EntryDraft {
            mood: 11,
            ..draft(at(1, 9))
        };
        assert!(matches!(journal.create(bad), Err(CoreError::Validation(_))));
        assert!(journal.store().list_all().unwrap().is_empty());
    }

    #[test]
    fn session_reverts_conflicting_date() {
        let journal = journal();
        let a = journal.create(draft(at(1, 9))).unwrap();
        journal.create(draft(at(2, 9))).unwrap();

        let mut session = journal.begin_edit(&a.id).unwrap();
        journal.change_date(&mut session, at(3, 9)).unwrap();
        assert_eq!(session.last_valid_date(), at(3, 9));

        let err = journal.change_date(&mut session, at(2, 18)).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateDate { .. }));
        assert_eq!(session.entry().date, at(3, 9));

        let saved = journal.commit(session).unwrap();
        assert_eq!(saved.date, at(3, 9));
    }

    #[test]
    fn moving_within_own_day_is_allowed() {
        let journal = journal();
        let a = journal.create(draft(at(1, 9))).unwrap();
        let changes = EntryChanges {
            date: Some(at(1, 22)),
            ..Default::default()
        };
        assert_eq!(journal.edit(&a.id, &changes).unwrap().date, at(1, 22));
    }

    #[test]
    fn edits_on_a_day_already_holding_duplicates_are_allowed() {
        let db = Database::open_memory().unwrap();
        let a = Entry::from_draft(draft(at(1, 8))).unwrap();
        let b = Entry::from_draft(draft(at(1, 20))).unwrap();
        db.insert(&a).unwrap();
        db.insert(&b).unwrap();
        let journal = Journal::new(db);

        let notes = EntryChanges {
            notes: Some("x".to_string()),
            mood: Some(4),
            ..Default::default()
        };
        assert_eq!(journal.edit(&a.id, &notes).unwrap().notes, "x");
        assert_eq!(journal.get(&a.id).unwrap().mood.get(), 4);

        let same_day = EntryChanges {
            date: Some(at(1, 12)),
            ..Default::default()
        };
        assert_eq!(journal.edit(&b.id, &same_day).unwrap().date, at(1, 12));

        let other_day = EntryChanges {
            date: Some(at(2, 12)),
            ..Default::default()
        };
        journal.edit(&b.id, &other_day).unwrap();
        let back = EntryChanges {
            date: Some(at(1, 21)),
            ..Default::default()
        };
        assert!(matches!(
            journal.edit(&b.id, &back),
            Err(CoreError::DuplicateDate { .. })
        ));
    }

    #[test]
    fn created_entry_matches_what_is_stored() {
        let journal = journal();
        let date = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_nano_opt(15, 38, 43, 103_067_820)
            .unwrap();
        let created = journal.create(draft(date)).unwrap();
        assert_eq!(journal.get(&created.id).unwrap(), created);

        let mut session = journal.begin_edit(&created.id).unwrap();
        journal
            .change_date(&mut session, date + chrono::Duration::days(1))
            .unwrap();
        let saved = journal.commit(session).unwrap();
        assert_eq!(journal.get(&created.id).unwrap(), saved);
    }

    #[test]
    fn edit_writes_nothing_on_conflict() {
        let journal = journal();
        let a = journal.create(draft(at(1, 9))).unwrap();
        journal.create(draft(at(2, 9))).unwrap();
        let changes = EntryChanges {
            date: Some(at(2, 12)),
            mood: Some(1),
            ..Default::default()
        };
        assert!(journal.edit(&a.id, &changes).is_err());
        assert_eq!(journal.get(&a.id).unwrap(), a);
    }

    #[test]
    fn commit_rechecks_against_store() {
        let journal = journal();
        let a = journal.create(draft(at(1, 9))).unwrap();
        let mut session = journal.begin_edit(&a.id).unwrap();
        journal.change_date(&mut session, at(4, 9)).unwrap();

        // Another writer takes the day between the check and the commit.
        journal.create(draft(at(4, 20))).unwrap();
        assert!(matches!(
            journal.commit(session),
            Err(CoreError::DuplicateDate { .. })
        ));
    }

    #[test]
    fn edit_unknown_id() {
        let journal = journal();
        assert!(matches!(
            journal.edit("nope", &EntryChanges::default()),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_frees_the_day() {
        let journal = journal();
        let a = journal.create(draft(at(1, 9))).unwrap();
        journal.delete(&a.id).unwrap();
        assert!(journal.create(draft(at(1, 10))).is_ok());
        assert!(matches!(journal.delete(&a.id), Err(CoreError::NotFound { .. })));
    }

    #[test]
    fn list_is_newest_first_with_readiness() {
        let journal = journal();
        journal
            .create(EntryDraft {
                sleep_quality: 10,
                mood: 10,
                muscle_soreness: 1,
                ..draft(at(1, 9))
            })
            .unwrap();
        journal
            .create(EntryDraft {
                sleep_quality: 1,
                mood: 1,
                muscle_soreness: 10,
                ..draft(at(2, 9))
            })
            .unwrap();

        let list = journal.list().unwrap();
        assert_eq!(list[0].entry.date, at(2, 9));
        assert_eq!(list[0].readiness.tier, Tier::Red);
        assert_eq!(list[1].readiness.score, 100);
    }

    #[test]
    fn summary_serializes_flat() {
        let entry = Entry::from_draft(draft(at(1, 9))).unwrap();
        let json = serde_json::to_value(EntrySummary::from(entry)).unwrap();
        assert!(json.get("id").is_some());
        assert_eq!(json["readiness"]["tier"], "yellow");
        assert_eq!(json["sleep_quality"], 7);
    }
}
