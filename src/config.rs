//! Runtime configuration. Paths default to a dot-directory in the user's home
//! and can be redirected through environment variables, which is also how
//! tests and scripted runs point the app at a scratch catalog.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".library-manager";
/// Books file name stored inside the application data directory.
const BOOKS_FILE_NAME: &str = "books.txt";
/// Log folder inside the application data directory.
const LOG_DIR_NAME: &str = "logs";
const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

pub const BOOKS_FILE_VAR: &str = "LIBRARY_BOOKS_FILE";
pub const LOG_DIR_VAR: &str = "LIBRARY_LOG_DIR";
pub const LOG_LEVEL_VAR: &str = "LIBRARY_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Flat file holding the catalog.
    pub books_path: PathBuf,
    /// Directory receiving rotated log files.
    pub log_dir: PathBuf,
    /// `log` level filter passed to the logger.
    pub log_level: String,
}

impl Config {
    /// Build the configuration from the process environment and the home
    /// directory reported by the OS.
    pub fn from_env() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Self::resolve(|key| std::env::var(key).ok(), base_dirs.home_dir())
    }

    /// Resolve settings from `lookup` (an environment accessor), falling back
    /// to locations under `home`. Empty variables count as unset.
    pub fn resolve<F>(lookup: F, home: &Path) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let data_dir = home.join(DATA_DIR_NAME);

        let books_path = var(BOOKS_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(BOOKS_FILE_NAME));
        let log_dir = var(LOG_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));

        let log_level = var(LOG_LEVEL_VAR)
            .map(|level| level.trim().to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        if !LOG_LEVELS.contains(&log_level.as_str()) {
            bail!(
                "unsupported log level `{log_level}` in {LOG_LEVEL_VAR}; expected one of {}",
                LOG_LEVELS.join(", ")
            );
        }

        Ok(Self {
            books_path,
            log_dir,
            log_level,
        })
    }
}
