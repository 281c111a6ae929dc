//! Path resolution for streaks configuration and data files.
//!
//! All streaks data is stored in `~/.streaks/`:
//! - `config.yaml` - Main configuration file
//! - `streaks.db` - SQLite database for habits and completions
//! - `exports/` - CSV export output
//!
//! The root can be overridden with the `STREAKS_HOME` environment variable,
//! which the integration tests use to point the binary at a temp directory.

use std::path::PathBuf;

use crate::error::StreaksError;

/// Paths to streaks configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.streaks/`
    pub root: PathBuf,
    /// Config file: `~/.streaks/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.streaks/streaks.db`
    pub database: PathBuf,
    /// Exports directory: `~/.streaks/exports/`
    pub exports: PathBuf,
}

impl Paths {
    /// Create paths based on `STREAKS_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither `STREAKS_HOME` nor `HOME` is set.
    pub fn new() -> Result<Self, StreaksError> {
        if let Ok(root) = std::env::var("STREAKS_HOME") {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            StreaksError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".streaks")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("streaks.db"),
            exports: root.join("exports"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), StreaksError> {
        let dirs = [&self.root, &self.exports];

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    StreaksError::Config(format!("Failed to create directory {:?}: {}", dir, e))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if home cannot be determined
            Self::with_root(PathBuf::from(".streaks"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_with_root() {
        let root = PathBuf::from("/tmp/test-streaks");
        let paths = Paths::with_root(root.clone());

        assert_eq!(paths.root, root);
        assert_eq!(paths.config_file, root.join("config.yaml"));
        assert_eq!(paths.database, root.join("streaks.db"));
        assert_eq!(paths.exports, root.join("exports"));
    }

    #[test]
    fn test_ensure_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().to_path_buf());

        paths.ensure_dirs().unwrap();

        assert!(paths.root.exists());
        assert!(paths.exports.exists());
    }
}
