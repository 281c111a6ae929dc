//! Storage layer for streaks.
//!
//! This module provides SQLite-based persistence for:
//! - The habit registry (name, creation date, reminder time)
//! - The completion log (one row per habit per day)

mod database;
mod migrations;

pub use database::Database;
