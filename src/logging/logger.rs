//! Structured logger with dry-run awareness.
use std::path::PathBuf;

use super::types::Log;
use super::utils::log_file_path;

/// Structured logger emitting through `tracing`.
///
/// All messages are also written to a persistent log file at
/// `$XDG_CACHE_HOME/dotdeploy/<command>.log` (default
/// `~/.cache/dotdeploy/<command>.log`) with timestamps and ANSI codes
/// stripped, regardless of console verbosity.
#[derive(Debug)]
pub struct Logger {
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger.
    ///
    /// Stores the log file path for display.  The file itself is created by
    /// [`init_subscriber`](super::subscriber::init_subscriber); this
    /// constructor does not write to it.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

impl Log for Logger {
    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn stage(&self, msg: &str) {
        tracing::info!(target: "dotdeploy::stage", "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Suppressed on console unless verbose; always written to the log file
    /// via the [`FileLayer`](super::subscriber::FileLayer).
    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: "dotdeploy::dry_run", "{msg}");
    }
}
