//! Database schema migrations.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Schema version after all migrations ran.
pub const CURRENT_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Returns 0 for a fresh database.
pub fn get_schema_version(conn: &Connection) -> SqliteResult<i32> {
    match conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    }) {
        Ok(v) => Ok(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(e) => Err(e),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Migration v1: entries table.
///
/// Dates are stored as `YYYY-MM-DDTHH:MM:SS` local time so string order is
/// chronological order.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS entries (
            id               TEXT PRIMARY KEY,
            entry_date       TEXT NOT NULL,
            sleep_quality    INTEGER NOT NULL,
            muscle_soreness  INTEGER NOT NULL,
            mood             INTEGER NOT NULL,
            training_load    INTEGER NOT NULL,
            notes            TEXT NOT NULL DEFAULT ''
        );",
    )?;
    set_schema_version(&tx, 1)?;
    tx.commit()?;
    tracing::info!("applied schema migration v1");
    Ok(())
}

/// Migration v2: index for day-range lookups.
///
/// Deliberately not UNIQUE: one entry per day is an advisory rule.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_entries_entry_date ON entries(entry_date);",
    )?;
    set_schema_version(&tx, 2)?;
    tx.commit()?;
    tracing::info!("applied schema migration v2");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_from_scratch() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute(
            "INSERT INTO entries (id, entry_date, sleep_quality, muscle_soreness, mood, training_load)
             VALUES ('e1', '2025-01-01T09:00:00', 7, 2, 7, 5)",
            [],
        )
        .unwrap();
        let notes: String = conn
            .query_row("SELECT notes FROM entries WHERE id = 'e1'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(notes, "");
    }

    #[test]
    fn test_migrate_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_incremental_migration() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema_version_table(&conn).unwrap();
        migrate_v1(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 1);

        migrate(&conn).unwrap();
        assert_eq!(get_schema_version(&conn).unwrap(), 2);

        let index_count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_entries_entry_date'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(index_count, 1);
    }

    #[test]
    fn same_day_rows_are_not_rejected_by_the_schema() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        for id in ["a", "b"] {
            conn.execute(
                "INSERT INTO entries (id, entry_date, sleep_quality, muscle_soreness, mood, training_load)
                 VALUES (?1, '2025-01-01T09:00:00', 7, 2, 7, 5)",
                [id],
            )
            .unwrap();
        }
    }
}
