//! Output formatting for streaks.
//!
//! This module provides formatters for displaying habit data in pretty
//! (colored, human-readable) and JSON form.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::StreaksError;
use crate::features::stats::HabitMetrics;
use crate::habits::{Habit, HabitSummary};

pub use json::*;
pub use pretty::*;

/// Format the habit list based on output format.
///
/// # Errors
///
/// Returns `StreaksError::Parse` if JSON serialization fails.
pub fn format_habits(
    rows: &[HabitSummary],
    format: OutputFormat,
) -> Result<String, StreaksError> {
    match format {
        OutputFormat::Pretty => Ok(format_habits_pretty(rows)),
        OutputFormat::Json => format_habits_json(rows),
    }
}

/// Format a single habit based on output format.
///
/// # Errors
///
/// Returns `StreaksError::Parse` if JSON serialization fails.
pub fn format_habit(habit: &Habit, format: OutputFormat) -> Result<String, StreaksError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(habit)),
        OutputFormat::Json => to_json(habit),
    }
}

/// Format habit statistics based on output format.
///
/// # Errors
///
/// Returns `StreaksError::Parse` if JSON serialization fails.
pub fn format_stats(
    habit: &Habit,
    metrics: &HabitMetrics,
    format: OutputFormat,
) -> Result<String, StreaksError> {
    match format {
        OutputFormat::Pretty => Ok(format_stats_pretty(habit, metrics)),
        OutputFormat::Json => to_json(metrics),
    }
}
