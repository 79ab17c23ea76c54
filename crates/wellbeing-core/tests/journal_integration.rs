//! Integration tests for the journal write paths and derived views.

use chrono::{NaiveDate, NaiveDateTime};
use wellbeing_core::{
    build_trend, compute_readiness, find_conflict, CoreError, Database, EntryChanges, EntryDraft,
    EntryStore, Journal, Tier,
};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn draft(date: NaiveDateTime, sleep: u8, mood: u8, soreness: u8) -> EntryDraft {
    EntryDraft {
        date,
        sleep_quality: i64::from(sleep),
        mood: i64::from(mood),
        muscle_soreness: i64::from(soreness),
        training_load: 5,
        notes: String::new(),
    }
}

#[test]
fn test_stored_entries_conflict_by_calendar_day() {
    let journal = Journal::new(Database::open_memory().unwrap());
    let first = journal.create(draft(at(2025, 1, 1, 9, 0), 7, 7, 2)).unwrap();
    journal.create(draft(at(2025, 1, 2, 22, 0), 7, 7, 2)).unwrap();

    let stored = journal.store().list_all().unwrap();

    let hit = find_conflict(at(2025, 1, 1, 23, 59), &stored, None).unwrap();
    assert_eq!(hit.id, first.id);

    assert!(find_conflict(at(2025, 1, 1, 23, 59), &stored, Some(first.id.as_str())).is_none());
    assert!(find_conflict(at(2025, 1, 3, 0, 0), &stored, None).is_none());
}

#[test]
fn test_full_add_edit_delete_workflow() {
    let journal = Journal::new(Database::open_memory().unwrap());

    let entry = journal.create(draft(at(2025, 1, 1, 8, 0), 7, 7, 2)).unwrap();
    let readiness = compute_readiness(&entry);
    assert_eq!(readiness.score, 76);
    assert_eq!(readiness.label, "Moderat");

    let edited = journal
        .edit(
            &entry.id,
            &EntryChanges {
                sleep_quality: Some(10),
                mood: Some(10),
                muscle_soreness: Some(1),
                notes: Some("fresh".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    let readiness = compute_readiness(&edited);
    assert_eq!(readiness.score, 100);
    assert_eq!(readiness.tier, Tier::Green);
    assert_eq!(journal.get(&entry.id).unwrap().notes, "fresh");

    journal.delete(&entry.id).unwrap();
    assert!(journal.list().unwrap().is_empty());
}

#[test]
fn test_edit_date_onto_occupied_day_is_rejected_and_reverted() {
    let journal = Journal::new(Database::open_memory().unwrap());
    let a = journal.create(draft(at(2025, 1, 1, 8, 0), 5, 5, 5)).unwrap();
    let b = journal.create(draft(at(2025, 1, 5, 8, 0), 5, 5, 5)).unwrap();

    let mut session = journal.begin_edit(&b.id).unwrap();
    let err = journal
        .change_date(&mut session, at(2025, 1, 1, 19, 0))
        .unwrap_err();
    match err {
        CoreError::DuplicateDate { existing_id, day } => {
            assert_eq!(existing_id, a.id);
            assert_eq!(day, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(session.entry().date, at(2025, 1, 5, 8, 0));

    journal.change_date(&mut session, at(2025, 1, 6, 8, 0)).unwrap();
    journal.commit(session).unwrap();
    assert_eq!(journal.get(&b.id).unwrap().date, at(2025, 1, 6, 8, 0));
}

#[test]
fn test_duplicates_written_behind_the_guard_are_still_readable() {
    let db = Database::open_memory().unwrap();
    let a = wellbeing_core::Entry::from_draft(draft(at(2025, 2, 1, 8, 0), 6, 6, 3)).unwrap();
    let b = wellbeing_core::Entry::from_draft(draft(at(2025, 2, 1, 20, 0), 4, 4, 6)).unwrap();
    db.insert(&a).unwrap();
    db.insert(&b).unwrap();

    let journal = Journal::new(db);
    assert_eq!(journal.list().unwrap().len(), 2);

    let trend = build_trend(
        &journal.store().list_all().unwrap(),
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        7,
    );
    assert_eq!(trend.points.len(), 2);
    assert_eq!(trend.points[0].sleep_quality, 6);
}

#[test]
fn test_trend_from_stored_entries() {
    let journal = Journal::new(Database::open_memory().unwrap());
    for (day, sleep, soreness) in [(3, 8, 2), (1, 4, 7), (2, 6, 4)] {
        journal
            .create(draft(at(2025, 1, day, 7, 30), sleep, 6, soreness))
            .unwrap();
    }
    let trend = build_trend(
        &journal.store().list_all().unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
        30,
    );
    let sleep: Vec<u8> = trend.points.iter().map(|p| p.sleep_quality).collect();
    assert_eq!(sleep, vec![4, 6, 8]);
    assert!(trend.render_text().contains("03.01"));
}
