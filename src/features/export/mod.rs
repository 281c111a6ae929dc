//! CSV export of the habit report.
//!
//! One row per (habit, completion date) pair with left-join semantics:
//! habits with no completions still produce one row whose `Done` field is
//! empty.

use std::path::Path;

use crate::core::format_date;
use crate::error::StreaksError;
use crate::habits::ExportRow;

/// Column headers for the export file.
const HEADER: &str = "Habit,Created,Done";

/// Render export rows as CSV text.
#[must_use]
pub fn render_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');

    for row in rows {
        out.push_str(&escape_field(&row.habit));
        out.push(',');
        out.push_str(&format_date(row.created));
        out.push(',');
        if let Some(done) = row.done {
            out.push_str(&format_date(done));
        }
        out.push('\n');
    }

    out
}

/// Write the export report to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_csv(path: &Path, rows: &[ExportRow]) -> Result<(), StreaksError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, render_csv(rows))?;
    Ok(())
}

/// Quote a field if it contains a delimiter, quote, or newline.
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(habit: &str, created: NaiveDate, done: Option<NaiveDate>) -> ExportRow {
        ExportRow {
            habit: habit.to_string(),
            created,
            done,
        }
    }

    #[test]
    fn test_render_header_only() {
        assert_eq!(render_csv(&[]), "Habit,Created,Done\n");
    }

    #[test]
    fn test_render_rows() {
        let rows = vec![
            row("Read", date(2024, 1, 1), Some(date(2024, 1, 2))),
            row("Walk", date(2024, 1, 1), None),
        ];

        let csv = render_csv(&rows);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "Read,2024-01-01,2024-01-02");
        // Habit with no completions keeps an empty Done field
        assert_eq!(lines[2], "Walk,2024-01-01,");
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("Read"), "Read");
        assert_eq!(escape_field("Read, daily"), "\"Read, daily\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_creates_parent_dir() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("exports").join("habits.csv");

        write_csv(&path, &[row("Read", date(2024, 1, 1), None)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Habit,Created,Done\n"));
        assert!(contents.contains("Read,2024-01-01,"));
    }
}
