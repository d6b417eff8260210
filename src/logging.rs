//! Run logger for the append-only backup log
//!
//! Provides the RunLog struct that records one line per backup attempt.
//! Each entry is timestamped, written as a single text line, and
//! flushed immediately.

use std::ffi::OsString;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use chrono::Local;

use crate::error::{BackupError, BackupResult};

/// Default log file name, created in the working directory
pub const LOG_FILE_NAME: &str = "backup.log";

/// Environment variable that redirects the log to another path
pub const LOG_PATH_ENV: &str = "SQBAK_LOG_FILE";

/// Timestamp layout used for every log line
const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %H:%M:%S %p";

/// Severity marker for a log line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Info => write!(f, "INFO"),
            Level::Error => write!(f, "ERROR"),
        }
    }
}

/// Handles writing run outcomes to the backup log file
///
/// The log is append-only; every run adds lines and never rewrites
/// earlier ones, so the file doubles as a history of all attempts.
pub struct RunLog {
    /// Path to the log file
    log_path: PathBuf,
}

impl RunLog {
    /// Create a new RunLog that writes to the specified path
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Create a RunLog from the environment
    ///
    /// Path resolution:
    /// 1. `SQBAK_LOG_FILE` env var (explicit override)
    /// 2. `backup.log` in the current working directory
    pub fn from_env() -> Self {
        Self::new(resolve_log_path(std::env::var_os(LOG_PATH_ENV)))
    }

    /// Record a successful run
    pub fn info(&self, message: &str) -> BackupResult<()> {
        self.append(Level::Info, message)
    }

    /// Record a failed run
    pub fn error(&self, message: &str) -> BackupResult<()> {
        self.append(Level::Error, message)
    }

    /// Append one timestamped line to the log file
    ///
    /// Each write is flushed immediately so the entry survives even if
    /// the process exits right after.
    fn append(&self, level: Level, message: &str) -> BackupResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| BackupError::Io(format!("Failed to open backup log: {}", e)))?;

        let stamp = Local::now().format(TIMESTAMP_FORMAT);
        writeln!(file, "{} {}: {}", stamp, level, message)
            .map_err(|e| BackupError::Io(format!("Failed to write log entry: {}", e)))?;

        file.flush()
            .map_err(|e| BackupError::Io(format!("Failed to flush backup log: {}", e)))?;

        Ok(())
    }

    /// Read all lines from the log file
    ///
    /// Returns lines in chronological order (oldest first).
    pub fn read_all(&self) -> BackupResult<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path)
            .map_err(|e| BackupError::Io(format!("Failed to open backup log: {}", e)))?;

        let reader = BufReader::new(file);
        let mut lines = Vec::new();

        for line in reader.lines() {
            let line =
                line.map_err(|e| BackupError::Io(format!("Failed to read backup log: {}", e)))?;

            // Skip empty lines
            if line.trim().is_empty() {
                continue;
            }

            lines.push(line);
        }

        Ok(lines)
    }

    /// Check if the log file exists
    pub fn exists(&self) -> bool {
        self.log_path.exists()
    }

    /// Get the path to the log file
    pub fn path(&self) -> &PathBuf {
        &self.log_path
    }
}

/// Resolve the log path from an optional override value
fn resolve_log_path(override_path: Option<OsString>) -> PathBuf {
    match override_path {
        Some(custom) => PathBuf::from(custom),
        None => PathBuf::from(LOG_FILE_NAME),
    }
}
