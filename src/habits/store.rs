//! Habit persistence.
//!
//! All mutations go through this store. Duplicate completions are rejected
//! by the `UNIQUE(habit_id, date)` constraint rather than a pre-check, so
//! `mark_done` stays correct even if two commands race on the same day.

use chrono::{NaiveDate, NaiveTime};
use rusqlite::{params, Row};

use crate::core::{format_date, DATE_FORMAT};
use crate::error::StreaksError;
use crate::habits::types::{ExportRow, Habit};
use crate::storage::Database;

/// Storage for habits and their completion log.
pub struct HabitStore {
    db: Database,
}

impl HabitStore {
    /// Open the store at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open() -> Result<Self, StreaksError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create a store with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Register a new habit and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add(
        &self,
        name: &str,
        created: NaiveDate,
        reminder: Option<NaiveTime>,
    ) -> Result<Habit, StreaksError> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO habits (name, created, reminder) VALUES (?1, ?2, ?3)",
            params![
                name,
                format_date(created),
                reminder.map(|t| t.format("%H:%M").to_string()),
            ],
        )
        .map_err(|e| StreaksError::Database(format!("Failed to insert habit: {e}")))?;

        Ok(Habit {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created,
            reminder,
        })
    }

    /// Update a habit's name and reminder in place.
    ///
    /// Returns false if no habit with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn edit(
        &self,
        id: i64,
        name: &str,
        reminder: Option<NaiveTime>,
    ) -> Result<bool, StreaksError> {
        let conn = self.db.connection();

        let rows = conn
            .execute(
                "UPDATE habits SET name = ?1, reminder = ?2 WHERE id = ?3",
                params![
                    name,
                    reminder.map(|t| t.format("%H:%M").to_string()),
                    id,
                ],
            )
            .map_err(|e| StreaksError::Database(format!("Failed to update habit: {e}")))?;

        Ok(rows > 0)
    }

    /// Delete a habit and its completion log.
    ///
    /// Log entries are removed before the habit row, in one transaction.
    /// Returns false if no habit with the given id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if either delete fails.
    pub fn delete(&mut self, id: i64) -> Result<bool, StreaksError> {
        self.db.transaction(|tx| {
            tx.execute("DELETE FROM completions WHERE habit_id = ?1", [id])
                .map_err(|e| {
                    StreaksError::Database(format!("Failed to delete completions: {e}"))
                })?;

            let rows = tx
                .execute("DELETE FROM habits WHERE id = ?1", [id])
                .map_err(|e| StreaksError::Database(format!("Failed to delete habit: {e}")))?;

            Ok(rows > 0)
        })
    }

    /// Record a completion for the given date.
    ///
    /// Returns true if the completion was newly recorded, false if one
    /// already existed for that date (a no-op, not an error).
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn mark_done(&self, id: i64, date: NaiveDate) -> Result<bool, StreaksError> {
        let conn = self.db.connection();

        let rows = conn
            .execute(
                "INSERT OR IGNORE INTO completions (habit_id, date) VALUES (?1, ?2)",
                params![id, format_date(date)],
            )
            .map_err(|e| StreaksError::Database(format!("Failed to record completion: {e}")))?;

        Ok(rows > 0)
    }

    /// Get a habit by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get(&self, id: i64) -> Result<Option<Habit>, StreaksError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, name, created, reminder FROM habits WHERE id = ?1")
            .map_err(|e| StreaksError::Database(format!("Failed to prepare query: {e}")))?;

        let result = stmt
            .query_row([id], row_to_habit)
            .optional()
            .map_err(|e| StreaksError::Database(format!("Failed to query habit: {e}")))?;

        Ok(result)
    }

    /// List all habits ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list(&self) -> Result<Vec<Habit>, StreaksError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, name, created, reminder FROM habits ORDER BY id")
            .map_err(|e| StreaksError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_habit)
            .map_err(|e| StreaksError::Database(format!("Failed to query habits: {e}")))?;

        let mut habits = Vec::new();
        for row in rows {
            habits.push(row.map_err(|e| StreaksError::Database(e.to_string()))?);
        }

        Ok(habits)
    }

    /// Completion dates for a habit, most recent first.
    ///
    /// This is the input the statistics engine expects.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date is unparsable.
    pub fn dates_for(&self, id: i64) -> Result<Vec<NaiveDate>, StreaksError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT date FROM completions WHERE habit_id = ?1 ORDER BY date DESC")
            .map_err(|e| StreaksError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([id], |row| row.get::<_, String>(0))
            .map_err(|e| StreaksError::Database(format!("Failed to query completions: {e}")))?;

        let mut dates = Vec::new();
        for row in rows {
            let text = row.map_err(|e| StreaksError::Database(e.to_string()))?;
            let date = NaiveDate::parse_from_str(&text, DATE_FORMAT)
                .map_err(|e| StreaksError::Parse(format!("Bad completion date {text:?}: {e}")))?;
            dates.push(date);
        }

        Ok(dates)
    }

    /// Rows for the export report.
    ///
    /// Left join: habits with no completions still produce one row, with
    /// the completion field absent. Ordered by habit name, then date.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored date is unparsable.
    pub fn export_rows(&self) -> Result<Vec<ExportRow>, StreaksError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT h.name, h.created, c.date
                  FROM habits h
                  LEFT JOIN completions c ON h.id = c.habit_id
                  ORDER BY h.name, c.date",
            )
            .map_err(|e| StreaksError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            })
            .map_err(|e| StreaksError::Database(format!("Failed to query export rows: {e}")))?;

        let mut out = Vec::new();
        for row in rows {
            let (habit, created_text, done_text) =
                row.map_err(|e| StreaksError::Database(e.to_string()))?;

            let created = NaiveDate::parse_from_str(&created_text, DATE_FORMAT).map_err(|e| {
                StreaksError::Parse(format!("Bad creation date {created_text:?}: {e}"))
            })?;

            let done = match done_text {
                Some(text) => Some(NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(
                    |e| StreaksError::Parse(format!("Bad completion date {text:?}: {e}")),
                )?),
                None => None,
            };

            out.push(ExportRow {
                habit,
                created,
                done,
            });
        }

        Ok(out)
    }
}

/// Convert a database row to a Habit.
fn row_to_habit(row: &Row<'_>) -> Result<Habit, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let created_text: String = row.get(2)?;
    let reminder_text: Option<String> = row.get(3)?;

    let created = NaiveDate::parse_from_str(&created_text, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;

    // A reminder that no longer parses is treated as absent rather than
    // failing every listing.
    let reminder = reminder_text.and_then(|t| crate::core::parse_reminder_time(&t));

    Ok(Habit {
        id,
        name,
        created,
        reminder,
    })
}

// Add optional() extension for rusqlite
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn create_test_store() -> HabitStore {
        let db = Database::open_in_memory().unwrap();
        HabitStore::with_database(db)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_add_and_get() {
        let store = create_test_store();

        let habit = store
            .add("Read", date(2024, 1, 1), NaiveTime::from_hms_opt(9, 0, 0))
            .unwrap();
        assert!(habit.id > 0);

        let loaded = store.get(habit.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Read");
        assert_eq!(loaded.created, date(2024, 1, 1));
        assert_eq!(loaded.reminder, NaiveTime::from_hms_opt(9, 0, 0));
    }

    #[test]
    fn test_get_missing() {
        let store = create_test_store();
        assert!(store.get(99).unwrap().is_none());
    }

    #[test]
    fn test_edit() {
        let store = create_test_store();

        let habit = store.add("Read", date(2024, 1, 1), None).unwrap();
        assert!(store
            .edit(habit.id, "Read more", NaiveTime::from_hms_opt(21, 30, 0))
            .unwrap());

        let loaded = store.get(habit.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Read more");
        assert_eq!(loaded.reminder, NaiveTime::from_hms_opt(21, 30, 0));
        // id and creation date untouched
        assert_eq!(loaded.id, habit.id);
        assert_eq!(loaded.created, date(2024, 1, 1));
    }

    #[test]
    fn test_edit_missing_is_tolerant() {
        let store = create_test_store();
        assert!(!store.edit(99, "Ghost", None).unwrap());
    }

    #[test]
    fn test_mark_done_idempotent_per_day() {
        let store = create_test_store();
        let habit = store.add("Read", date(2024, 1, 1), None).unwrap();

        assert!(store.mark_done(habit.id, date(2024, 1, 2)).unwrap());
        assert!(!store.mark_done(habit.id, date(2024, 1, 2)).unwrap());

        let dates = store.dates_for(habit.id).unwrap();
        assert_eq!(dates, vec![date(2024, 1, 2)]);
    }

    #[test]
    fn test_dates_for_descending() {
        let store = create_test_store();
        let habit = store.add("Read", date(2024, 1, 1), None).unwrap();

        store.mark_done(habit.id, date(2024, 1, 2)).unwrap();
        store.mark_done(habit.id, date(2024, 1, 5)).unwrap();
        store.mark_done(habit.id, date(2024, 1, 3)).unwrap();

        let dates = store.dates_for(habit.id).unwrap();
        assert_eq!(
            dates,
            vec![date(2024, 1, 5), date(2024, 1, 3), date(2024, 1, 2)]
        );
    }

    #[test]
    fn test_delete_removes_log_first() {
        let mut store = create_test_store();
        let habit = store.add("Read", date(2024, 1, 1), None).unwrap();
        store.mark_done(habit.id, date(2024, 1, 2)).unwrap();
        store.mark_done(habit.id, date(2024, 1, 3)).unwrap();

        assert!(store.delete(habit.id).unwrap());
        assert!(store.get(habit.id).unwrap().is_none());
        assert!(store.dates_for(habit.id).unwrap().is_empty());

        // Re-adding the same name gets a fresh id with an empty log
        let again = store.add("Read", date(2024, 2, 1), None).unwrap();
        assert_ne!(again.id, habit.id);
        assert!(store.dates_for(again.id).unwrap().is_empty());
    }

    #[test]
    fn test_delete_missing_is_tolerant() {
        let mut store = create_test_store();
        assert!(!store.delete(99).unwrap());
    }

    #[test]
    fn test_export_rows_left_join() {
        let store = create_test_store();

        let walk = store.add("Walk", date(2024, 1, 1), None).unwrap();
        store.add("Zzz", date(2024, 1, 1), None).unwrap();

        store.mark_done(walk.id, date(2024, 1, 3)).unwrap();
        store.mark_done(walk.id, date(2024, 1, 2)).unwrap();
        store.mark_done(walk.id, date(2024, 1, 4)).unwrap();

        let rows = store.export_rows().unwrap();
        assert_eq!(rows.len(), 4);

        // Ordered by name, then date; Walk's three completions first
        assert_eq!(rows[0].habit, "Walk");
        assert_eq!(rows[0].done, Some(date(2024, 1, 2)));
        assert_eq!(rows[1].done, Some(date(2024, 1, 3)));
        assert_eq!(rows[2].done, Some(date(2024, 1, 4)));

        // Zzz has no completions but still appears once
        assert_eq!(rows[3].habit, "Zzz");
        assert!(rows[3].done.is_none());
    }

    #[test]
    fn test_list_ordered_by_id() {
        let store = create_test_store();
        store.add("B", date(2024, 1, 1), None).unwrap();
        store.add("A", date(2024, 1, 1), None).unwrap();

        let habits = store.list().unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "B");
        assert_eq!(habits[1].name, "A");
        assert!(habits[0].id < habits[1].id);
    }
}
