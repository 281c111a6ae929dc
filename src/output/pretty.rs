use colored::Colorize;

use crate::features::stats::{render_bar_chart, render_sparkline, HabitMetrics};
use crate::habits::{Habit, HabitSummary};

/// Format the habit list as a pretty table
#[must_use]
pub fn format_habits_pretty(rows: &[HabitSummary]) -> String {
    if rows.is_empty() {
        return "Habits (0)\n  No habits yet. Add one with 'streaks add <name>'.".to_string();
    }

    let mut output = format!("Habits ({})\n", rows.len());
    output.push_str(&format!(
        "{:>4}  {:<24} {:<12} {:>7}  {:<12} {:<7}\n",
        "ID", "Name", "Created", "Streak", "Last done", "Reminder"
    ));
    output.push_str(&"─".repeat(74));
    output.push('\n');

    for row in rows {
        let name = if row.habit.name.len() > 23 {
            format!("{}…", &row.habit.name[..22])
        } else {
            row.habit.name.clone()
        };

        let streak = if row.streak > 0 {
            format!("{}d", row.streak).green().to_string()
        } else {
            "0d".dimmed().to_string()
        };

        let last_done = row
            .last_done
            .map_or_else(|| "Never".dimmed().to_string(), |d| d.to_string());

        output.push_str(&format!(
            "{:>4}  {:<24} {:<12} {:>7}  {:<12} {:<7}\n",
            row.habit.id,
            name.bold(),
            row.habit.created,
            streak,
            last_done,
            row.habit.reminder_display().cyan(),
        ));
    }

    output
}

/// Format a single habit as pretty output
#[must_use]
pub fn format_habit_pretty(habit: &Habit) -> String {
    let mut output = format!("{}\n", habit.name.bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), habit.id));
    output.push_str(&format!("  {}: {}\n", "Created".dimmed(), habit.created));
    output.push_str(&format!(
        "  {}: {}\n",
        "Reminder".dimmed(),
        habit.reminder_display()
    ));
    output
}

/// Format habit statistics as pretty output
#[must_use]
pub fn format_stats_pretty(habit: &Habit, metrics: &HabitMetrics) -> String {
    let mut output = Vec::new();

    output.push(format!("📊 Stats for: {}", habit.name).bold().to_string());
    output.push("─".repeat(50));

    let streak_display = if metrics.streak > 0 {
        format!("{} days", metrics.streak).green().to_string()
    } else {
        "0 days".dimmed().to_string()
    };
    output.push(format!("Current streak:  {streak_display}"));
    output.push(format!(
        "Total:           {} completions",
        metrics.total_completions
    ));
    if let Some(last) = metrics.last_done {
        output.push(format!("Last done:       {last}"));
    }
    output.push(format!(
        "Last {} days:    {} completions",
        metrics.window_days, metrics.window_count
    ));

    if metrics.recent.is_empty() {
        output.push(format!("Recent:          {}", "None".dimmed()));
    } else {
        let recent: Vec<String> = metrics.recent.iter().map(ToString::to_string).collect();
        output.push(format!("Recent:          {}", recent.join(", ")));
    }

    output.push(String::new());
    output.push("Weekly (last 4 weeks, oldest first):".to_string());
    let weekly: Vec<(String, u32)> = metrics
        .weekly
        .iter()
        .enumerate()
        .map(|(i, count)| (format!("Week {}", i + 1), *count))
        .collect();
    output.push(render_bar_chart(&weekly, 25));

    output.push(String::new());
    output.push("Monthly (last 6 months, oldest first):".to_string());
    let monthly: Vec<(String, u32)> = metrics
        .monthly
        .iter()
        .enumerate()
        .map(|(i, count)| (format!("Month {}", i + 1), *count))
        .collect();
    output.push(render_bar_chart(&monthly, 25));

    output.push(String::new());
    output.push(format!("Trend: {}", render_sparkline(&metrics.weekly)));

    output.join("\n")
}
