//! Database migrations for streaks.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::StreaksError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, StreaksError> {
    // Try to read from user_version pragma
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| StreaksError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), StreaksError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| StreaksError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), StreaksError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    // Run migrations in order
    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), StreaksError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(StreaksError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `habits`: The habit registry
/// - `completions`: The per-habit completion log, one row per day
///
/// Dates are stored as `YYYY-MM-DD` text. The `UNIQUE(habit_id, date)`
/// constraint guarantees at most one completion per habit per calendar day.
fn migrate_v1(conn: &Connection) -> Result<(), StreaksError> {
    conn.execute_batch(
        r"
        -- Habit registry
        CREATE TABLE IF NOT EXISTS habits (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            created TEXT NOT NULL,
            reminder TEXT
        );

        -- Completion log
        CREATE TABLE IF NOT EXISTS completions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id INTEGER NOT NULL REFERENCES habits(id),
            date TEXT NOT NULL,
            UNIQUE(habit_id, date)
        );

        CREATE INDEX IF NOT EXISTS idx_completions_habit
        ON completions(habit_id);

        CREATE INDEX IF NOT EXISTS idx_completions_date
        ON completions(date);
        ",
    )
    .map_err(|e| StreaksError::Database(format!("Migration v1 failed: {e}")))
}
