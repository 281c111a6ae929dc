//! Command-line interface for streaks.

pub mod args;
pub mod commands;
