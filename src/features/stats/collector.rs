//! Summary collection for list views.
//!
//! Joins the habit registry with per-habit completion dates to produce
//! the rows the CLI table and the TUI grid both display.

use chrono::NaiveDate;

use crate::error::StreaksError;
use crate::habits::{HabitStore, HabitSummary};

use super::metrics::streak;

/// Build one summary row per habit: current streak and last completion.
///
/// # Errors
///
/// Returns an error if the registry or a completion log cannot be read.
pub fn collect_summaries(
    store: &HabitStore,
    today: NaiveDate,
) -> Result<Vec<HabitSummary>, StreaksError> {
    store
        .list()?
        .into_iter()
        .map(|habit| {
            let dates = store.dates_for(habit.id)?;
            Ok(HabitSummary {
                streak: streak(&dates, today),
                last_done: dates.first().copied(),
                habit,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;
    use chrono::Duration;

    #[test]
    fn test_collect_summaries() {
        let db = Database::open_in_memory().unwrap();
        let store = HabitStore::with_database(db);
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

        let read = store.add("Read", today - Duration::days(10), None).unwrap();
        store.add("Walk", today - Duration::days(10), None).unwrap();

        store.mark_done(read.id, today).unwrap();
        store.mark_done(read.id, today - Duration::days(1)).unwrap();

        let rows = collect_summaries(&store, today).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].streak, 2);
        assert_eq!(rows[0].last_done, Some(today));
        assert_eq!(rows[1].streak, 0);
        assert!(rows[1].last_done.is_none());
    }
}
