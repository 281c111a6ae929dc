//! Feature implementations for streaks.
//!
//! This module contains the implementation of the non-CRUD features:
//! - Streak and bucket statistics
//! - One-shot reminder scheduling
//! - CSV export
//! - Interactive picker

pub mod export;
pub mod interactive;
pub mod reminders;
pub mod stats;
