//! Core abstractions for streaks.
//!
//! This module provides shared date/time utilities used across features.

mod datetime;

pub use datetime::{
    format_date, next_occurrence, parse_date, parse_reminder_time, today, DATE_FORMAT,
};
