//! One-shot habit reminders.
//!
//! A reminder fires a single notification at the next occurrence of its
//! clock time, then is consumed. Reminders live only for the process
//! lifetime; they are armed from stored habits when an interactive
//! surface starts and cancelled on shutdown.

mod scheduler;

pub use scheduler::{ChannelNotifier, ConsoleNotifier, Notify, ReminderScheduler};
