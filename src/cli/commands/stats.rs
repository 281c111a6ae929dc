//! Statistics command implementation.

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::core::today;
use crate::error::StreaksError;
use crate::features::interactive::pick_habit;
use crate::features::stats::HabitMetrics;
use crate::habits::HabitStore;
use crate::output::format_stats;

/// Execute the stats command.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a validation error when no
/// habit could be selected interactively.
pub fn stats(
    store: &HabitStore,
    id: Option<i64>,
    format: OutputFormat,
) -> Result<String, StreaksError> {
    let id = match id {
        Some(id) => id,
        None => {
            let habits = store.list()?;
            if habits.is_empty() {
                return Err(StreaksError::Validation(
                    "no habits yet - add one with 'streaks add <name>'".to_string(),
                ));
            }
            pick_habit(habits, "Stats for > ")
                .ok_or_else(|| StreaksError::Validation("no habit selected".to_string()))?
        }
    };

    let habit = store.get(id)?.ok_or(StreaksError::NotFound(id))?;
    let dates = store.dates_for(id)?;

    let config = Config::load()?;
    let metrics = HabitMetrics::calculate(
        &dates,
        today(),
        i64::from(config.stats.history_window_days),
        config.stats.recent_count,
    );

    format_stats(&habit, &metrics, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    #[test]
    fn test_stats_unknown_id() {
        let db = Database::open_in_memory().unwrap();
        let store = HabitStore::with_database(db);

        let result = stats(&store, Some(7), OutputFormat::Pretty);
        assert!(matches!(result, Err(StreaksError::NotFound(7))));
    }

    #[test]
    fn test_stats_renders_for_existing_habit() {
        let db = Database::open_in_memory().unwrap();
        let store = HabitStore::with_database(db);

        let habit = store.add("Read", today(), None).unwrap();
        store.mark_done(habit.id, today()).unwrap();

        let output = stats(&store, Some(habit.id), OutputFormat::Pretty).unwrap();
        assert!(output.contains("Read"));
        assert!(output.contains("streak"));
    }
}
