//! Command implementations for streaks.
//!
//! This module contains the implementation of all CLI commands. Each
//! command returns its output as a string; main prints it.

mod stats;

pub use stats::stats;

use std::io::Write as _;
use std::path::PathBuf;

use clap::CommandFactory;
use clap_complete::Shell;
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddArgs, Cli, EditArgs, OutputFormat};
use crate::config::{Config, Paths};
use crate::core::{parse_reminder_time, today};
use crate::error::StreaksError;
use crate::features::export::write_csv;
use crate::features::interactive::pick_habit;
use crate::features::stats::{collect_summaries, streak};
use crate::habits::{Habit, HabitStore};
use crate::output::{format_habits, to_json};

/// Execute the add command.
///
/// # Errors
///
/// Returns a `Validation` error for a blank name, or a database error if
/// the insert fails.
pub fn add(store: &HabitStore, args: &AddArgs, format: OutputFormat) -> Result<String, StreaksError> {
    let name = args.name.trim();
    if name.is_empty() {
        return Err(StreaksError::Validation(
            "habit name cannot be empty".to_string(),
        ));
    }

    // An unparsable reminder never blocks the add; it just isn't armed.
    let mut warning = None;
    let reminder = match args.remind.as_deref() {
        Some(raw) => {
            let parsed = parse_reminder_time(raw);
            if parsed.is_none() {
                warning = Some(format!(
                    "warning: '{raw}' is not a valid HH:MM time - no reminder set"
                ));
            }
            parsed
        }
        None => None,
    };

    let habit = store.add(name, today(), reminder)?;

    match format {
        OutputFormat::Json => to_json(&habit),
        OutputFormat::Pretty => {
            let mut output = format!("Added '{}' (id {})", habit.name.bold(), habit.id);
            if let Some(time) = habit.reminder {
                output.push_str(&format!("\n  Reminder set for {}", time.format("%H:%M")));
            }
            if let Some(warning) = warning {
                output.push_str(&format!("\n  {}", warning.yellow()));
            }
            Ok(output)
        }
    }
}

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if the habits cannot be read.
pub fn list(store: &HabitStore, format: OutputFormat) -> Result<String, StreaksError> {
    let rows = collect_summaries(store, today())?;
    format_habits(&rows, format)
}

/// Execute the done command.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a validation error when no
/// habit could be selected interactively.
pub fn done(store: &HabitStore, id: Option<i64>, format: OutputFormat) -> Result<String, StreaksError> {
    let id = resolve_id(store, id, "Mark done > ")?;
    let habit = store.get(id)?.ok_or(StreaksError::NotFound(id))?;

    let date = today();
    let recorded = store.mark_done(id, date)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "id": id,
            "name": habit.name,
            "date": date,
            "recorded": recorded,
        })),
        OutputFormat::Pretty => Ok(if recorded {
            let current = streak(&store.dates_for(id)?, date);
            format!(
                "Marked '{}' done - {} day streak",
                habit.name.bold(),
                current.to_string().green()
            )
        } else {
            format!("'{}' is already done today", habit.name)
        }),
    }
}

/// Execute the edit command.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id or a `Validation` error for a
/// blank name.
pub fn edit(store: &HabitStore, args: &EditArgs, format: OutputFormat) -> Result<String, StreaksError> {
    let current = store
        .get(args.id)?
        .ok_or(StreaksError::NotFound(args.id))?;

    let name = match args.name.as_deref() {
        Some(name) if name.trim().is_empty() => {
            return Err(StreaksError::Validation(
                "habit name cannot be empty".to_string(),
            ));
        }
        Some(name) => name.trim().to_string(),
        None => current.name.clone(),
    };

    let mut warning = None;
    let reminder = if args.clear_reminder {
        None
    } else {
        match args.remind.as_deref() {
            Some(raw) => {
                let parsed = parse_reminder_time(raw);
                if parsed.is_none() {
                    warning = Some(format!(
                        "warning: '{raw}' is not a valid HH:MM time - no reminder set"
                    ));
                }
                parsed
            }
            None => current.reminder,
        }
    };

    store.edit(args.id, &name, reminder)?;

    let updated = Habit {
        id: args.id,
        name,
        created: current.created,
        reminder,
    };

    match format {
        OutputFormat::Json => to_json(&updated),
        OutputFormat::Pretty => {
            let mut output = format!("Updated '{}'", updated.name.bold());
            if let Some(warning) = warning {
                output.push_str(&format!("\n  {}", warning.yellow()));
            }
            Ok(output)
        }
    }
}

/// Execute the delete command.
///
/// Log entries are removed together with the habit. Asks for
/// confirmation on a terminal unless `yes` is set.
///
/// # Errors
///
/// Returns `NotFound` for an unknown id, or a validation error when
/// confirmation is unavailable in JSON mode.
pub fn delete(
    store: &mut HabitStore,
    id: Option<i64>,
    yes: bool,
    format: OutputFormat,
) -> Result<String, StreaksError> {
    let id = resolve_id(store, id, "Delete habit > ")?;
    let habit = store.get(id)?.ok_or(StreaksError::NotFound(id))?;

    if !yes {
        if format == OutputFormat::Json {
            return Err(StreaksError::Validation(
                "--yes is required with JSON output".to_string(),
            ));
        }
        if !confirm(&format!("Delete '{}'? This removes its log too.", habit.name))? {
            return Ok("Aborted".to_string());
        }
    }

    store.delete(id)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "name": habit.name, "deleted": true })),
        OutputFormat::Pretty => Ok(format!("Deleted '{}'", habit.name.bold())),
    }
}

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if the rows cannot be read or the file cannot be
/// written.
pub fn export(
    store: &HabitStore,
    path: Option<PathBuf>,
    format: OutputFormat,
) -> Result<String, StreaksError> {
    let path = match path {
        Some(path) => path,
        None => {
            let paths = Paths::new()?;
            paths.ensure_dirs()?;
            let config = Config::load()?;
            paths.exports.join(config.export.filename)
        }
    };

    let rows = store.export_rows()?;
    write_csv(&path, &rows)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "rows": rows.len(),
            "path": path,
        })),
        OutputFormat::Pretty => Ok(format!(
            "Exported {} rows to {}",
            rows.len(),
            path.display().to_string().bold()
        )),
    }
}

/// Generate shell completions.
#[must_use]
pub fn completions(shell: Shell) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "streaks", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Resolve an optional habit id, opening the picker when omitted.
fn resolve_id(store: &HabitStore, id: Option<i64>, prompt: &str) -> Result<i64, StreaksError> {
    match id {
        Some(id) => Ok(id),
        None => {
            let habits = store.list()?;
            if habits.is_empty() {
                return Err(StreaksError::Validation(
                    "no habits yet - add one with 'streaks add <name>'".to_string(),
                ));
            }
            pick_habit(habits, prompt)
                .ok_or_else(|| StreaksError::Validation("no habit selected".to_string()))
        }
    }
}

/// Ask a yes/no question on the terminal.
fn confirm(prompt: &str) -> Result<bool, StreaksError> {
    print!("{prompt} (y/n): ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
