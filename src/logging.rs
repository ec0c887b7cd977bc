//! Structured logging to a file
//!
//! The terminal belongs to the UI, so log output goes to a file. The level
//! comes from `RUST_LOG` and defaults to `info`. A log file that cannot be
//! opened only disables logging; the viewer still starts.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the file logger, returning whether logging is active
pub fn start_logging(path: &Path) -> bool {
    match open_log_file(path).and_then(install_subscriber) {
        Ok(()) => true,
        Err(err) => {
            eprintln!("warning: logging disabled: {err:#}");
            false
        }
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

fn install_subscriber(file: File) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .context("Failed to install log subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwritable_log_path_disables_logging() {
        let blocker = std::env::temp_dir().join(format!("data-table-log-{}", std::process::id()));
        fs::write(&blocker, "not a directory").unwrap();

        // the parent "directory" is a regular file
        let path = blocker.join("logs").join("data-table.log");
        assert!(open_log_file(&path).is_err());
        assert!(!start_logging(&path));

        fs::remove_file(&blocker).unwrap();
    }
}
