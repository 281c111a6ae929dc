//! Error types for streaks.

use thiserror::Error;

/// Errors that can occur in streaks operations.
#[derive(Debug, Error)]
pub enum StreaksError {
    /// Database open, query, or migration failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration or environment problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or parsing failure.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Input rejected at the presentation boundary.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A habit id that does not exist.
    #[error("No habit with id {0}")]
    NotFound(i64),

    /// Filesystem failure (export, config).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StreaksError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

impl From<serde_yaml::Error> for StreaksError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(format!("YAML error: {e}"))
    }
}
