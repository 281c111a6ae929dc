//! Date and time utilities.
//!
//! Dates are handled at calendar-day granularity throughout; reminder
//! times are 24-hour `HH:MM` values with no seconds.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// Storage format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Reminder times are two integers separated by ':'; anything else is
// rejected and no reminder is armed.
static REMINDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{1,2})$").unwrap_or_else(|e| panic!("Invalid reminder regex: {e}"))
});

/// The current local calendar date.
#[must_use]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date for storage and display.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a stored `YYYY-MM-DD` date.
#[must_use]
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

/// Parse a reminder time in 24-hour `HH:MM` format.
///
/// Returns `None` for anything that is not two integers separated by a
/// colon, or for out-of-range hours/minutes.
#[must_use]
pub fn parse_reminder_time(input: &str) -> Option<NaiveTime> {
    let caps = REMINDER_PATTERN.captures(input.trim())?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Compute the next occurrence of a clock time at or after `now`.
///
/// If today's occurrence has already passed (or is exactly `now`), the
/// result is the same clock time tomorrow; otherwise it is today.
#[must_use]
pub fn next_occurrence(reminder: NaiveTime, now: NaiveDateTime) -> NaiveDateTime {
    let candidate = NaiveDateTime::new(now.date(), reminder);
    if candidate <= now {
        candidate + Duration::days(1)
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDateTime::new(
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
            NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        )
    }

    #[test]
    fn test_parse_reminder_time() {
        assert_eq!(parse_reminder_time("09:00"), Some(time(9, 0)));
        assert_eq!(parse_reminder_time("9:5"), Some(time(9, 5)));
        assert_eq!(parse_reminder_time("23:59"), Some(time(23, 59)));
        assert_eq!(parse_reminder_time(" 07:30 "), Some(time(7, 30)));
    }

    #[test]
    fn test_parse_reminder_time_invalid() {
        assert!(parse_reminder_time("").is_none());
        assert!(parse_reminder_time("9").is_none());
        assert!(parse_reminder_time("nine:thirty").is_none());
        assert!(parse_reminder_time("09:00:00").is_none());
        assert!(parse_reminder_time("25:00").is_none());
        assert!(parse_reminder_time("12:75").is_none());
    }

    #[test]
    fn test_next_occurrence_later_today() {
        let next = next_occurrence(time(9, 0), at(8, 0));
        assert_eq!(next, at(9, 0));
    }

    #[test]
    fn test_next_occurrence_rolls_to_tomorrow() {
        let next = next_occurrence(time(9, 0), at(10, 0));
        assert_eq!(next.date(), at(0, 0).date() + Duration::days(1));
        assert_eq!(next.time(), time(9, 0));
    }

    #[test]
    fn test_next_occurrence_exact_now_rolls_over() {
        let next = next_occurrence(time(10, 0), at(10, 0));
        assert_eq!(next.date(), at(0, 0).date() + Duration::days(1));
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        assert_eq!(parse_date(&format_date(date)), Some(date));
        assert!(parse_date("not a date").is_none());
    }
}
