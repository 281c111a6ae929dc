//! Configuration management for streaks.
//!
//! This module handles loading and saving configuration from `~/.streaks/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, ExportConfig, GeneralConfig, ReminderConfig, StatsConfig};
