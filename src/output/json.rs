//! JSON output formatting for streaks.

use serde::Serialize;
use serde_json::json;

use crate::error::StreaksError;
use crate::habits::HabitSummary;

/// Format the habit list as JSON
///
/// # Errors
///
/// Returns `StreaksError::Parse` if JSON serialization fails.
pub fn format_habits_json(rows: &[HabitSummary]) -> Result<String, StreaksError> {
    let output = json!({
        "count": rows.len(),
        "items": rows
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `StreaksError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, StreaksError> {
    Ok(serde_json::to_string_pretty(value)?)
}
