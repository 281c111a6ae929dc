//! Application state for the TUI.

use chrono::Local;

use crate::config::Config;
use crate::core::{parse_reminder_time, today};
use crate::error::StreaksError;
use crate::features::reminders::ReminderScheduler;
use crate::features::stats::{collect_summaries, render_bar_chart, render_sparkline, HabitMetrics};
use crate::habits::{HabitStore, HabitSummary};

/// Input mode of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the habit table.
    Normal,
    /// Typing the name for a new habit.
    AddName,
    /// Typing the reminder for a new habit.
    AddReminder,
    /// Typing the new name for the selected habit.
    EditName,
    /// Typing the new reminder for the selected habit.
    EditReminder,
    /// Waiting for delete confirmation.
    ConfirmDelete,
    /// Showing the stats popup.
    Stats,
}

/// Application state.
pub struct App {
    store: HabitStore,
    scheduler: ReminderScheduler,
    window_days: i64,
    recent_count: usize,
    /// Current table rows.
    pub rows: Vec<HabitSummary>,
    /// Currently selected index.
    pub selected: usize,
    /// Current input mode.
    pub mode: Mode,
    /// Input buffer for add/edit prompts.
    pub input: String,
    /// Name captured between the name and reminder input steps.
    pending_name: Option<String>,
    /// Habit id being edited.
    pending_id: Option<i64>,
    /// Status message to display.
    pub status: Option<String>,
    /// Content of the stats popup.
    pub stats_text: Option<String>,
}

impl App {
    /// Create a new app instance and arm stored reminders.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit list cannot be read.
    pub fn new(
        store: HabitStore,
        scheduler: ReminderScheduler,
        config: &Config,
    ) -> Result<Self, StreaksError> {
        if config.reminders.enabled {
            let now = Local::now().naive_local();
            for habit in store.list()? {
                if let Some(time) = habit.reminder {
                    scheduler.arm(
                        habit.id,
                        &habit.name,
                        &time.format("%H:%M").to_string(),
                        now,
                    );
                }
            }
        }

        let mut app = Self {
            store,
            scheduler,
            window_days: i64::from(config.stats.history_window_days),
            recent_count: config.stats.recent_count,
            rows: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            input: String::new(),
            pending_name: None,
            pending_id: None,
            status: Some("Press ? for help".to_string()),
            stats_text: None,
        };
        app.refresh()?;

        Ok(app)
    }

    /// Reload the habit table.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit list cannot be read.
    pub fn refresh(&mut self) -> Result<(), StreaksError> {
        self.rows = collect_summaries(&self.store, today())?;

        // Adjust selection if it's out of bounds
        if !self.rows.is_empty() && self.selected >= self.rows.len() {
            self.selected = self.rows.len() - 1;
        }

        Ok(())
    }

    /// Get the currently selected row.
    #[must_use]
    pub fn selected_row(&self) -> Option<&HabitSummary> {
        self.rows.get(self.selected)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if !self.rows.is_empty() && self.selected < self.rows.len() - 1 {
            self.selected += 1;
        }
    }

    /// Jump to first row.
    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    /// Jump to last row.
    pub fn select_last(&mut self) {
        if !self.rows.is_empty() {
            self.selected = self.rows.len() - 1;
        }
    }

    /// Mark the selected habit done for today.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion cannot be recorded.
    pub fn mark_done_selected(&mut self) -> Result<(), StreaksError> {
        if let Some(row) = self.selected_row() {
            let id = row.habit.id;
            let name = row.habit.name.clone();

            self.status = Some(if self.store.mark_done(id, today())? {
                format!("Marked '{name}' done")
            } else {
                format!("'{name}' already done today")
            });
            self.refresh()?;
        }
        Ok(())
    }

    /// Export the habit report to the default CSV location.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    pub fn export(&mut self) -> Result<(), StreaksError> {
        let paths = crate::config::Paths::new()?;
        paths.ensure_dirs()?;
        let config = Config::load()?;
        let path = paths.exports.join(config.export.filename);

        let rows = self.store.export_rows()?;
        crate::features::export::write_csv(&path, &rows)?;

        self.status = Some(format!("Exported {} rows to {}", rows.len(), path.display()));
        Ok(())
    }

    /// Start adding a new habit.
    pub fn begin_add(&mut self) {
        self.mode = Mode::AddName;
        self.input.clear();
        self.status = Some("New habit name (Enter to continue, Esc to cancel)".to_string());
    }

    /// Start editing the selected habit.
    pub fn begin_edit(&mut self) {
        if let Some(row) = self.selected_row() {
            let id = row.habit.id;
            let name = row.habit.name.clone();

            self.pending_id = Some(id);
            self.input = name;
            self.mode = Mode::EditName;
            self.status = Some("Edit name (Enter to continue, Esc to cancel)".to_string());
        }
    }

    /// Ask for confirmation before deleting the selected habit.
    pub fn begin_delete(&mut self) {
        if let Some(row) = self.selected_row() {
            let name = row.habit.name.clone();

            self.status = Some(format!("Delete '{name}' and its log? (y/n)"));
            self.mode = Mode::ConfirmDelete;
        }
    }

    /// Delete the selected habit after confirmation.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn confirm_delete(&mut self) -> Result<(), StreaksError> {
        if let Some(row) = self.selected_row() {
            let id = row.habit.id;
            let name = row.habit.name.clone();

            self.scheduler.cancel(id);
            self.store.delete(id)?;
            self.status = Some(format!("Deleted '{name}'"));
            self.refresh()?;
        }
        self.mode = Mode::Normal;
        Ok(())
    }

    /// Show the stats popup for the selected habit.
    ///
    /// # Errors
    ///
    /// Returns an error if the completion log cannot be read.
    pub fn show_stats(&mut self) -> Result<(), StreaksError> {
        if let Some(row) = self.selected_row() {
            let id = row.habit.id;
            let name = row.habit.name.clone();

            let dates = self.store.dates_for(id)?;
            let metrics =
                HabitMetrics::calculate(&dates, today(), self.window_days, self.recent_count);

            self.stats_text = Some(render_stats_text(&name, &metrics));
            self.mode = Mode::Stats;
        }
        Ok(())
    }

    /// Close the stats popup.
    pub fn close_stats(&mut self) {
        self.stats_text = None;
        self.mode = Mode::Normal;
    }

    /// Submit the current input buffer for the active mode.
    ///
    /// # Errors
    ///
    /// Returns an error if a storage operation fails.
    pub fn submit_input(&mut self) -> Result<(), StreaksError> {
        match self.mode {
            Mode::AddName | Mode::EditName => {
                let name = self.input.trim().to_string();
                if name.is_empty() {
                    self.status = Some("Habit name cannot be empty".to_string());
                    return Ok(());
                }

                self.pending_name = Some(name);
                self.input.clear();

                if self.mode == Mode::AddName {
                    self.mode = Mode::AddReminder;
                    self.status =
                        Some("Reminder HH:MM (Enter to skip, Esc to cancel)".to_string());
                } else {
                    // Pre-fill with the current reminder
                    if let Some(time) = self
                        .pending_id
                        .and_then(|id| self.rows.iter().find(|r| r.habit.id == id))
                        .and_then(|r| r.habit.reminder)
                    {
                        self.input = time.format("%H:%M").to_string();
                    }
                    self.mode = Mode::EditReminder;
                    self.status =
                        Some("Reminder HH:MM (Enter to save, Esc to cancel)".to_string());
                }
            }
            Mode::AddReminder => self.finish_add()?,
            Mode::EditReminder => self.finish_edit()?,
            Mode::Normal | Mode::ConfirmDelete | Mode::Stats => {}
        }
        Ok(())
    }

    /// Cancel any input in progress and return to the table.
    pub fn cancel_input(&mut self) {
        self.mode = Mode::Normal;
        self.input.clear();
        self.pending_name = None;
        self.pending_id = None;
        self.stats_text = None;
    }

    /// Cancel all pending reminder timers.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }

    fn finish_add(&mut self) -> Result<(), StreaksError> {
        let Some(name) = self.pending_name.take() else {
            self.cancel_input();
            return Ok(());
        };

        let (reminder, warning) = parse_reminder_input(&self.input);
        let habit = self.store.add(&name, today(), reminder)?;

        if let Some(time) = habit.reminder {
            self.scheduler.arm(
                habit.id,
                &habit.name,
                &time.format("%H:%M").to_string(),
                Local::now().naive_local(),
            );
        }

        self.status = Some(warning.unwrap_or_else(|| format!("Added '{}'", habit.name)));
        self.cancel_input();
        self.refresh()
    }

    fn finish_edit(&mut self) -> Result<(), StreaksError> {
        let (Some(name), Some(id)) = (self.pending_name.take(), self.pending_id.take()) else {
            self.cancel_input();
            return Ok(());
        };

        let (reminder, warning) = parse_reminder_input(&self.input);
        self.store.edit(id, &name, reminder)?;

        // The old timer must never fire with the old name or time
        self.scheduler.rearm(
            id,
            &name,
            reminder.map(|t| t.format("%H:%M").to_string()).as_deref(),
            Local::now().naive_local(),
        );

        self.status = Some(warning.unwrap_or_else(|| format!("Updated '{name}'")));
        self.cancel_input();
        self.refresh()
    }
}

/// Parse the reminder input field: empty means no reminder, an invalid
/// time means no reminder plus a warning.
fn parse_reminder_input(input: &str) -> (Option<chrono::NaiveTime>, Option<String>) {
    let raw = input.trim();
    if raw.is_empty() {
        return (None, None);
    }

    match parse_reminder_time(raw) {
        Some(time) => (Some(time), None),
        None => (
            None,
            Some(format!("'{raw}' is not a valid HH:MM time - no reminder set")),
        ),
    }
}

/// Plain-text stats rendering for the popup (no ANSI colors).
fn render_stats_text(name: &str, metrics: &HabitMetrics) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Stats for: {name}"));
    lines.push(String::new());
    lines.push(format!("Current streak: {} days", metrics.streak));
    lines.push(format!("Total completions: {}", metrics.total_completions));
    if let Some(last) = metrics.last_done {
        lines.push(format!("Last done: {last}"));
    }
    lines.push(format!(
        "Last {} days: {} completions",
        metrics.window_days, metrics.window_count
    ));

    if !metrics.recent.is_empty() {
        let recent: Vec<String> = metrics.recent.iter().map(ToString::to_string).collect();
        lines.push(format!("Recent: {}", recent.join(", ")));
    }

    lines.push(String::new());
    lines.push("Weekly (oldest first):".to_string());
    let weekly: Vec<(String, u32)> = metrics
        .weekly
        .iter()
        .enumerate()
        .map(|(i, count)| (format!("W{}", i + 1), *count))
        .collect();
    lines.push(render_bar_chart(&weekly, 20));

    lines.push(String::new());
    lines.push("Monthly (oldest first):".to_string());
    let monthly: Vec<(String, u32)> = metrics
        .monthly
        .iter()
        .enumerate()
        .map(|(i, count)| (format!("M{}", i + 1), *count))
        .collect();
    lines.push(render_bar_chart(&monthly, 20));

    lines.push(String::new());
    lines.push(format!("Trend: {}", render_sparkline(&metrics.weekly)));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reminders::ConsoleNotifier;
    use crate::storage::Database;
    use std::sync::Arc;

    fn create_test_app() -> App {
        let db = Database::open_in_memory().unwrap();
        let store = HabitStore::with_database(db);
        let scheduler = ReminderScheduler::new(Arc::new(ConsoleNotifier));
        App::new(store, scheduler, &Config::default()).unwrap()
    }

    #[test]
    fn test_add_flow() {
        let mut app = create_test_app();

        app.begin_add();
        assert_eq!(app.mode, Mode::AddName);

        app.input = "Read".to_string();
        app.submit_input().unwrap();
        assert_eq!(app.mode, Mode::AddReminder);

        app.input = "21:00".to_string();
        app.submit_input().unwrap();
        assert_eq!(app.mode, Mode::Normal);

        assert_eq!(app.rows.len(), 1);
        assert_eq!(app.rows[0].habit.name, "Read");
        assert!(app.rows[0].habit.reminder.is_some());

        app.shutdown();
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "   ".to_string();
        app.submit_input().unwrap();

        // Still waiting for a name
        assert_eq!(app.mode, Mode::AddName);
        assert!(app.rows.is_empty());
    }

    #[test]
    fn test_add_invalid_reminder_warns_but_adds() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "Read".to_string();
        app.submit_input().unwrap();
        app.input = "9pm".to_string();
        app.submit_input().unwrap();

        assert_eq!(app.rows.len(), 1);
        assert!(app.rows[0].habit.reminder.is_none());
        assert!(app.status.as_deref().unwrap_or("").contains("not a valid"));
    }

    #[test]
    fn test_mark_done_updates_status() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "Read".to_string();
        app.submit_input().unwrap();
        app.submit_input().unwrap();

        app.mark_done_selected().unwrap();
        assert!(app.status.as_deref().unwrap_or("").contains("Marked"));
        assert_eq!(app.rows[0].streak, 1);

        app.mark_done_selected().unwrap();
        assert!(app
            .status
            .as_deref()
            .unwrap_or("")
            .contains("already done"));
    }

    #[test]
    fn test_delete_flow() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "Read".to_string();
        app.submit_input().unwrap();
        app.submit_input().unwrap();
        assert_eq!(app.rows.len(), 1);

        app.begin_delete();
        assert_eq!(app.mode, Mode::ConfirmDelete);

        app.confirm_delete().unwrap();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.rows.is_empty());
    }

    #[test]
    fn test_edit_flow_rearms_reminder() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "Read".to_string();
        app.submit_input().unwrap();
        app.submit_input().unwrap();

        app.begin_edit();
        assert_eq!(app.mode, Mode::EditName);
        assert_eq!(app.input, "Read");

        app.input = "Read more".to_string();
        app.submit_input().unwrap();
        assert_eq!(app.mode, Mode::EditReminder);

        app.input = "07:00".to_string();
        app.submit_input().unwrap();

        assert_eq!(app.rows[0].habit.name, "Read more");
        assert!(app.rows[0].habit.reminder.is_some());

        app.shutdown();
    }

    #[test]
    fn test_stats_popup() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "Read".to_string();
        app.submit_input().unwrap();
        app.submit_input().unwrap();
        app.mark_done_selected().unwrap();

        app.show_stats().unwrap();
        assert_eq!(app.mode, Mode::Stats);
        let text = app.stats_text.as_deref().unwrap_or("");
        assert!(text.contains("Stats for: Read"));
        assert!(text.contains("Current streak: 1"));

        app.close_stats();
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn test_cancel_input_resets() {
        let mut app = create_test_app();

        app.begin_add();
        app.input = "Half-typed".to_string();
        app.cancel_input();

        assert_eq!(app.mode, Mode::Normal);
        assert!(app.input.is_empty());
        assert!(app.rows.is_empty());
    }
}
