use std::path::PathBuf;

use board_core::Database;
use directories::ProjectDirs;

pub const DEFAULT_LOG_FILTER: &str = "board_service=info,board_core=info";

pub const ENV_DATABASE_PATH: &str = "BOARD_DATABASE_PATH";
pub const ENV_STORAGE_ROOT: &str = "BOARD_STORAGE_ROOT";
pub const ENV_LOG: &str = "BOARD_LOG";

/// Runtime settings: platform defaults, then environment, then CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub storage_root: PathBuf,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        let storage_root = ProjectDirs::from("", "", "boards")
            .map(|dirs| dirs.data_dir().join("attachments"))
            .unwrap_or_else(|| PathBuf::from("attachments"));
        Self {
            database_path: Database::default_path(),
            storage_root,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env(|key| std::env::var(key).ok())
    }

    /// Overlays values found through `lookup`; empty values are ignored.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(path) = lookup(ENV_DATABASE_PATH) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(root) = lookup(ENV_STORAGE_ROOT) {
            self.storage_root = PathBuf::from(root);
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        self
    }

    pub fn with_overrides(mut self, database: Option<PathBuf>, storage_root: Option<PathBuf>) -> Self {
        if let Some(path) = database {
            self.database_path = path;
        }
        if let Some(root) = storage_root {
            self.storage_root = root;
        }
        self
    }
}
