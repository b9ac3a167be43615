//! Record store configuration.
//!
//! The database location is the only external input core needs.

use crate::db::OpenOptions;
use std::path::{Path, PathBuf};

/// Database file name used when no path is configured.
pub const DEFAULT_DB_FILE_NAME: &str = "coffee.sqlite";

/// Where the catalog lives and how connections to it are opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub open: OpenOptions,
}

impl StoreConfig {
    /// Config for a database at `path` with default open options.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: path.into(),
            open: OpenOptions::default(),
        }
    }

    /// Fails instead of creating a fresh file when the database is absent.
    pub fn require_existing(mut self) -> Self {
        self.open.create_if_missing = false;
        self
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for StoreConfig {
    /// `coffee.sqlite` in the current working directory.
    fn default() -> Self {
        Self::with_path(DEFAULT_DB_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DB_FILE_NAME};
    use std::path::Path;

    #[test]
    fn default_points_at_coffee_sqlite() {
        let config = StoreConfig::default();
        assert_eq!(config.db_path(), Path::new(DEFAULT_DB_FILE_NAME));
        assert!(config.open.create_if_missing);
    }

    #[test]
    fn require_existing_disables_creation() {
        let config = StoreConfig::with_path("/tmp/catalog.sqlite").require_existing();
        assert!(!config.open.create_if_missing);
    }
}
