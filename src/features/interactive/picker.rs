//! Fuzzy picker implementation using skim.
//!
//! Presents the habit list and returns the chosen habit's id.

use std::borrow::Cow;
use std::sync::Arc;

use skim::prelude::*;

use crate::habits::Habit;

/// A wrapper around Habit that implements SkimItem.
struct HabitItem {
    habit: Habit,
    display: String,
}

impl HabitItem {
    fn new(habit: Habit) -> Self {
        let reminder = if habit.reminder.is_some() {
            format!("  @{}", habit.reminder_display())
        } else {
            String::new()
        };

        let display = format!("{:>3}  {}{}", habit.id, habit.name, reminder);

        Self { habit, display }
    }
}

impl SkimItem for HabitItem {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.display)
    }

    fn preview(&self, _context: PreviewContext<'_>) -> ItemPreview {
        let mut preview = String::new();
        preview.push_str(&format!("Habit: {}\n", self.habit.name));
        preview.push_str(&format!("ID: {}\n", self.habit.id));
        preview.push_str(&format!("Created: {}\n", self.habit.created));
        preview.push_str(&format!("Reminder: {}\n", self.habit.reminder_display()));
        ItemPreview::Text(preview)
    }

    fn output(&self) -> Cow<'_, str> {
        // Return the id for easy processing
        Cow::Owned(self.habit.id.to_string())
    }
}

/// Run the interactive picker on a list of habits.
///
/// Returns the selected habit id, or None if the list is empty or the
/// user aborted.
#[must_use]
pub fn pick_habit(habits: Vec<Habit>, prompt: &str) -> Option<i64> {
    if habits.is_empty() {
        return None;
    }

    let skim_options = SkimOptionsBuilder::default()
        .height(Some("50%"))
        .multi(false)
        .prompt(Some(prompt))
        .preview(Some(""))
        .preview_window(Some("right:40%:wrap"))
        .bind(vec!["ctrl-c:abort", "enter:accept"])
        .build()
        .ok()?;

    let items: Vec<Arc<dyn SkimItem>> = habits
        .into_iter()
        .map(|h| {
            let item: Arc<dyn SkimItem> = Arc::new(HabitItem::new(h));
            item
        })
        .collect();

    let (tx, rx): (SkimItemSender, SkimItemReceiver) = unbounded();
    for item in items {
        let _ = tx.send(item);
    }
    drop(tx); // Close sender

    let output = Skim::run_with(&skim_options, Some(rx))?;

    if output.is_abort {
        return None;
    }

    output
        .selected_items
        .first()
        .and_then(|item| item.output().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn test_habit_item_display() {
        let habit = Habit {
            id: 3,
            name: "Stretch".to_string(),
            created: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            reminder: NaiveTime::from_hms_opt(7, 30, 0),
        };

        let item = HabitItem::new(habit);
        assert!(item.display.contains("Stretch"));
        assert!(item.display.contains("@07:30"));
        assert_eq!(item.output(), "3");
    }

    #[test]
    fn test_pick_habit_empty() {
        assert!(pick_habit(vec![], "Select habit > ").is_none());
    }
}
