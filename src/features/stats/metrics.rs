//! Metric calculations for habit statistics.
//!
//! All functions take the habit's completion dates plus the current date,
//! and compare at calendar-day granularity.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of weekly buckets reported.
pub const WEEKLY_BUCKETS: usize = 4;

/// Number of monthly buckets reported.
pub const MONTHLY_BUCKETS: usize = 6;

/// Current streak: consecutive days with a completion, counting back from
/// and including `today`.
///
/// A missing completion for `today` means the streak is 0, regardless of
/// any run that ended yesterday.
#[must_use]
pub fn streak(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let set: HashSet<NaiveDate> = dates.iter().copied().collect();

    let mut count = 0;
    let mut day = today;
    while set.contains(&day) {
        count += 1;
        day -= Duration::days(1);
    }

    count
}

/// Completions within the trailing window, oldest first.
///
/// Includes every completion with `date >= today - window_days`.
#[must_use]
pub fn history_window(dates: &[NaiveDate], today: NaiveDate, window_days: i64) -> Vec<NaiveDate> {
    let start = today - Duration::days(window_days);

    let mut window: Vec<NaiveDate> = dates.iter().copied().filter(|d| *d >= start).collect();
    window.sort_unstable();
    window
}

/// Completion counts for the last four weeks, oldest week first.
///
/// Week `w` (counting back from today) spans `[today - 7(w+1), today - 7w)`,
/// so today's completion is not counted until tomorrow.
#[must_use]
pub fn weekly_buckets(dates: &[NaiveDate], today: NaiveDate) -> [u32; WEEKLY_BUCKETS] {
    let mut buckets = [0u32; WEEKLY_BUCKETS];

    for (w, bucket) in buckets.iter_mut().enumerate() {
        let start = today - Duration::days(((w + 1) * 7) as i64);
        let end = today - Duration::days((w * 7) as i64);
        *bucket = dates.iter().filter(|d| **d >= start && **d < end).count() as u32;
    }

    buckets.reverse();
    buckets
}

/// Completion counts for the last six months, oldest month first.
///
/// The current month spans from the 1st of the calendar month through
/// today, inclusive. Earlier buckets are 30-day approximations anchored at
/// the 1st of the current month, with inclusive endpoints. This drifts
/// from true calendar months over several buckets; it is inherited
/// behavior and kept for compatibility.
#[must_use]
pub fn monthly_buckets(dates: &[NaiveDate], today: NaiveDate) -> [u32; MONTHLY_BUCKETS] {
    let mut buckets = [0u32; MONTHLY_BUCKETS];
    let first_of_month = today.with_day(1).unwrap_or(today);

    for (m, bucket) in buckets.iter_mut().enumerate() {
        let (start, end) = if m == 0 {
            (first_of_month, today)
        } else {
            let start = first_of_month - Duration::days((m * 30) as i64);
            (start, start + Duration::days(30))
        };
        *bucket = dates.iter().filter(|d| **d >= start && **d <= end).count() as u32;
    }

    buckets.reverse();
    buckets
}

/// Aggregate statistics for one habit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitMetrics {
    /// Current streak in days.
    pub streak: u32,
    /// Total completions on record.
    pub total_completions: usize,
    /// Most recent completion date.
    pub last_done: Option<NaiveDate>,
    /// Completions within the trailing window.
    pub window_count: usize,
    /// The window length the count was computed over.
    pub window_days: i64,
    /// The most recent completions within the window, oldest first.
    pub recent: Vec<NaiveDate>,
    /// Last four weeks, oldest first.
    pub weekly: [u32; WEEKLY_BUCKETS],
    /// Last six months, oldest first.
    pub monthly: [u32; MONTHLY_BUCKETS],
}

impl HabitMetrics {
    /// Calculate all metrics from a habit's completion dates.
    #[must_use]
    pub fn calculate(
        dates: &[NaiveDate],
        today: NaiveDate,
        window_days: i64,
        recent_count: usize,
    ) -> Self {
        let window = history_window(dates, today, window_days);
        let recent = window
            .iter()
            .rev()
            .take(recent_count)
            .rev()
            .copied()
            .collect();

        Self {
            streak: streak(dates, today),
            total_completions: dates.len(),
            last_done: dates.iter().max().copied(),
            window_count: window.len(),
            window_days,
            recent,
            weekly: weekly_buckets(dates, today),
            monthly: monthly_buckets(dates, today),
        }
    }
}
