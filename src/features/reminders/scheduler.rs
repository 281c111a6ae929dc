//! Reminder scheduling.
//!
//! Owns the habit id -> pending timer map. Each timer is a thread parked
//! on a cancellation channel with a deadline; cancellation, replacement,
//! and shutdown all go through the map so no timer outlives its owner.
//!
//! Timers fire on their own threads, so delivery ordering relative to the
//! interactive surface is not guaranteed.

use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{NaiveDateTime, NaiveTime};

use crate::core::{next_occurrence, parse_reminder_time};

/// Notification sink for fired reminders.
#[cfg_attr(test, mockall::automock)]
pub trait Notify: Send + Sync {
    /// Deliver a reminder for the named habit.
    fn notify(&self, habit_name: &str);
}

/// Default sink: prints a human-readable message to stdout.
pub struct ConsoleNotifier;

impl Notify for ConsoleNotifier {
    fn notify(&self, habit_name: &str) {
        println!("Reminder: time to do '{habit_name}'!");
    }
}

/// Sink that forwards habit names over a channel.
///
/// The TUI uses this to surface fired reminders on its status line.
pub struct ChannelNotifier {
    tx: Mutex<Sender<String>>,
}

impl ChannelNotifier {
    #[must_use]
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx: Mutex::new(tx) }
    }
}

impl Notify for ChannelNotifier {
    fn notify(&self, habit_name: &str) {
        if let Ok(tx) = self.tx.lock() {
            // Receiver may be gone during shutdown
            let _ = tx.send(habit_name.to_string());
        }
    }
}

/// A pending one-shot timer.
struct TimerHandle {
    cancel: Sender<()>,
    thread: JoinHandle<()>,
}

type TimerMap = Arc<Mutex<HashMap<i64, TimerHandle>>>;

/// Scheduler for one-shot habit reminders.
///
/// Arm, cancel, and fire may interleave from different threads; the timer
/// map is the only shared state and is guarded by a single mutex.
pub struct ReminderScheduler {
    timers: TimerMap,
    notifier: Arc<dyn Notify>,
}

impl ReminderScheduler {
    /// Create a scheduler with the given notification sink.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notify>) -> Self {
        Self {
            timers: Arc::new(Mutex::new(HashMap::new())),
            notifier,
        }
    }

    /// Arm a one-shot reminder for a habit.
    ///
    /// `reminder` is a 24-hour `HH:MM` string; anything that does not
    /// parse arms nothing and returns false. If the clock time has
    /// already passed (or equals) `now`, the timer is scheduled for the
    /// same time tomorrow. Any pending timer for the habit is replaced.
    pub fn arm(&self, habit_id: i64, habit_name: &str, reminder: &str, now: NaiveDateTime) -> bool {
        let Some(time) = parse_reminder_time(reminder) else {
            return false;
        };

        self.arm_after(habit_id, habit_name, delay_until(time, now));
        true
    }

    /// Cancel any pending timer, then arm a new one if a reminder is set.
    ///
    /// Used on habit edit: the old timer never fires with the old name or
    /// time, and an absent reminder leaves the habit unarmed.
    pub fn rearm(
        &self,
        habit_id: i64,
        habit_name: &str,
        reminder: Option<&str>,
        now: NaiveDateTime,
    ) -> bool {
        self.cancel(habit_id);
        reminder.is_some_and(|r| self.arm(habit_id, habit_name, r, now))
    }

    /// Cancel and discard the pending timer for a habit.
    ///
    /// Returns false if no timer was pending.
    pub fn cancel(&self, habit_id: i64) -> bool {
        let handle = lock(&self.timers).remove(&habit_id);

        handle.is_some_and(|h| {
            let _ = h.cancel.send(());
            let _ = h.thread.join();
            true
        })
    }

    /// Number of pending timers.
    #[must_use]
    pub fn pending(&self) -> usize {
        lock(&self.timers).len()
    }

    /// Cancel all pending timers and join their threads.
    pub fn shutdown(&self) {
        let handles: Vec<TimerHandle> = {
            let mut map = lock(&self.timers);
            map.drain().map(|(_, h)| h).collect()
        };

        for handle in handles {
            let _ = handle.cancel.send(());
            let _ = handle.thread.join();
        }
    }

    /// Arm a timer that fires after `delay`.
    ///
    /// Split out from [`Self::arm`] so tests can use short delays.
    fn arm_after(&self, habit_id: i64, habit_name: &str, delay: Duration) {
        // Replace any pending timer for this habit
        self.cancel(habit_id);

        let (tx, rx) = mpsc::channel();
        let timers = Arc::clone(&self.timers);
        let notifier = Arc::clone(&self.notifier);
        let name = habit_name.to_string();

        let thread = std::thread::spawn(move || {
            match rx.recv_timeout(delay) {
                Err(RecvTimeoutError::Timeout) => {
                    notifier.notify(&name);
                    // The timer is consumed on fire; it is not re-armed
                    // for the following day.
                    lock(&timers).remove(&habit_id);
                }
                // Cancelled, or the scheduler dropped the handle
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {}
            }
        });

        lock(&self.timers).insert(
            habit_id,
            TimerHandle {
                cancel: tx,
                thread,
            },
        );
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Lock the timer map, recovering from a poisoned mutex.
fn lock(timers: &Mutex<HashMap<i64, TimerHandle>>) -> MutexGuard<'_, HashMap<i64, TimerHandle>> {
    timers.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Delay from `now` until the next occurrence of `reminder`.
fn delay_until(reminder: NaiveTime, now: NaiveDateTime) -> Duration {
    (next_occurrence(reminder, now) - now)
        .to_std()
        .unwrap_or_default()
}
