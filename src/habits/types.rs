use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A registered habit.
///
/// The id is assigned by the database on insert and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: i64,
    pub name: String,
    pub created: NaiveDate,
    #[serde(default)]
    pub reminder: Option<NaiveTime>,
}

impl Habit {
    /// The reminder time formatted for storage and display (`HH:MM`).
    #[must_use]
    pub fn reminder_display(&self) -> String {
        self.reminder
            .map_or_else(|| "None".to_string(), |t| t.format("%H:%M").to_string())
    }
}

/// A habit together with the per-row figures the list views show.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSummary {
    #[serde(flatten)]
    pub habit: Habit,
    pub streak: u32,
    #[serde(default)]
    pub last_done: Option<NaiveDate>,
}

/// One row of the export report.
///
/// A habit with completions produces one row per completion date; a habit
/// with none produces a single row with `done` absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub habit: String,
    pub created: NaiveDate,
    #[serde(default)]
    pub done: Option<NaiveDate>,
}
