//! Statistics over a habit's completion log.
//!
//! Everything here is a pure function of the completion dates and a
//! caller-supplied "today", so results are deterministic under test:
//! - Current streak length
//! - Rolling history window
//! - Weekly and monthly completion buckets

pub mod collector;
pub mod metrics;
pub mod visualization;

pub use collector::collect_summaries;
pub use metrics::{
    history_window, monthly_buckets, streak, weekly_buckets, HabitMetrics, MONTHLY_BUCKETS,
    WEEKLY_BUCKETS,
};
pub use visualization::{render_bar_chart, render_sparkline};
