//! File-based logging. The terminal belongs to the TUI, so log records go to
//! rotated files under the configured log directory instead of stderr.

use std::fs;

use anyhow::{Context, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;

use crate::config::Config;

const LOG_FILE_BASENAME: &str = "library-manager";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start the logger described by `config`.
///
/// The returned handle must stay alive for as long as records should be
/// written; dropping it flushes and stops the logger.
pub fn init(config: &Config) -> Result<LoggerHandle> {
    fs::create_dir_all(&config.log_dir).with_context(|| {
        format!(
            "failed to create log directory {}",
            config.log_dir.display()
        )
    })?;

    let handle = Logger::try_with_str(&config.log_level)
        .with_context(|| format!("invalid log level `{}`", config.log_level))?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")?;

    info!(
        "event=app_start module=core status=ok version={} books_path={}",
        env!("CARGO_PKG_VERSION"),
        config.books_path.display()
    );
    Ok(handle)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global logger can only be installed once per process, so this is
    // the only test that calls `init`.
    #[test]
    fn init_creates_log_directory_and_writes_startup_event() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            books_path: dir.path().join("books.txt"),
            log_dir: dir.path().join("nested").join("logs"),
            log_level: "info".to_string(),
        };

        let handle = init(&config).unwrap();
        handle.flush();
        assert!(config.log_dir.is_dir());

        let log_files: Vec<_> = fs::read_dir(&config.log_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(LOG_FILE_BASENAME))
            .collect();
        assert!(!log_files.is_empty());
    }
}
