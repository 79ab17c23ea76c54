//! SQLite-based entry storage.

use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{data_dir, migrations, EntryStore};
use crate::entry::{Entry, Rating};
use crate::error::{CoreError, DatabaseError, Result};

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const SELECT_ENTRY: &str = "SELECT id, entry_date, sleep_quality, muscle_soreness, mood, training_load, notes
     FROM entries";

/// Column values as stored, before rating and date validation.
struct EntryRow {
    id: String,
    date: String,
    sleep_quality: i64,
    muscle_soreness: i64,
    mood: i64,
    training_load: i64,
    notes: String,
}

impl EntryRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date: row.get(1)?,
            sleep_quality: row.get(2)?,
            muscle_soreness: row.get(3)?,
            mood: row.get(4)?,
            training_load: row.get(5)?,
            notes: row.get(6)?,
        })
    }

    fn into_entry(self) -> Result<Entry, DatabaseError> {
        let corrupt = |message: String| DatabaseError::CorruptRow {
            id: self.id.clone(),
            message,
        };
        let date = NaiveDateTime::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|e| corrupt(format!("bad date '{}': {e}", self.date)))?;
        let rate = |field: &str, value: i64| {
            Rating::for_field(field, value).map_err(|e| corrupt(e.to_string()))
        };
        let sleep_quality = rate("sleep_quality", self.sleep_quality)?;
        let muscle_soreness = rate("muscle_soreness", self.muscle_soreness)?;
        let mood = rate("mood", self.mood)?;
        let training_load = rate("training_load", self.training_load)?;

        Ok(Entry {
            id: self.id,
            date,
            sleep_quality,
            muscle_soreness,
            mood,
            training_load,
            notes: self.notes,
        })
    }
}

fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// SQLite database holding journal entries.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `<data dir>/wellbeing.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("wellbeing.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) the database file at `path`.
    pub fn open_at(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened entry database");
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, DatabaseError> {
        migrations::migrate(&conn).map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(Self { conn })
    }

    fn query_entries<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Entry>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, EntryRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        let entries = rows
            .into_iter()
            .map(EntryRow::into_entry)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

impl EntryStore for Database {
    fn insert(&self, entry: &Entry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO entries (id, entry_date, sleep_quality, muscle_soreness, mood, training_load, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id,
                format_date(entry.date),
                entry.sleep_quality.get(),
                entry.muscle_soreness.get(),
                entry.mood.get(),
                entry.training_load.get(),
                entry.notes,
            ],
        )?;
        Ok(())
    }

    fn update(&self, entry: &Entry) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE entries
             SET entry_date = ?2, sleep_quality = ?3, muscle_soreness = ?4,
                 mood = ?5, training_load = ?6, notes = ?7
             WHERE id = ?1",
            params![
                entry.id,
                format_date(entry.date),
                entry.sleep_quality.get(),
                entry.muscle_soreness.get(),
                entry.mood.get(),
                entry.training_load.get(),
                entry.notes,
            ],
        )?;
        if changed == 0 {
            return Err(CoreError::NotFound {
                id: entry.id.clone(),
            });
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(CoreError::NotFound { id: id.to_string() });
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Entry>> {
        let row = self
            .conn
            .query_row(
                &format!("{SELECT_ENTRY} WHERE id = ?1"),
                params![id],
                EntryRow::from_row,
            )
            .optional()?;
        Ok(row.map(EntryRow::into_entry).transpose()?)
    }

    fn list_all(&self) -> Result<Vec<Entry>> {
        self.query_entries(&format!("{SELECT_ENTRY} ORDER BY entry_date, id"), [])
    }

    fn entries_between(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<Vec<Entry>> {
        tracing::debug!(%start, %end, "querying entries in range");
        self.query_entries(
            &format!(
                "{SELECT_ENTRY} WHERE entry_date >= ?1 AND entry_date < ?2 ORDER BY entry_date, id"
            ),
            params![format_date(start), format_date(end)],
        )
    }
}
