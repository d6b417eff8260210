//! Custom error types for sqbak
//!
//! This module defines the failure taxonomy for the backup pipeline using
//! thiserror for ergonomic error definitions. Every way an invocation can
//! fail has its own variant so callers can tell precondition violations,
//! engine-level failures, and unexpected errors apart.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for sqbak operations
#[derive(Error, Debug)]
pub enum BackupError {
    /// Linked SQLite library is too old for the online backup API
    #[error("SQLite {required} or newer is required for online backup, found {found}")]
    UnsupportedRuntime { required: String, found: String },

    /// Source path is missing or not a regular file
    #[error("Source database does not exist or is not a regular file: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// Source file exists but cannot be read by this process
    #[error("Read access to source database denied: {}", .path.display())]
    SourceUnreadable { path: PathBuf },

    /// Existing destination file cannot be written by this process
    #[error("Write access to destination file denied: {}", .path.display())]
    DestinationUnwritable { path: PathBuf },

    /// Destination's parent directory cannot be written by this process
    #[error("Write access to destination directory denied: {}", .path.display())]
    DestinationDirUnwritable { path: PathBuf },

    /// Destination refused by the engine's open step, typically because
    /// its directory does not exist or the path names a directory
    #[error("Destination path cannot be opened as a database file: {}", .path.display())]
    DestinationPathInvalid { path: PathBuf },

    /// Source file exists and is readable but is not a SQLite database
    #[error("Source file is not a valid SQLite database: {}", .path.display())]
    MalformedSource { path: PathBuf },

    /// Unexpected database engine errors
    #[error("Database error: {0}")]
    Database(String),

    /// Unexpected file I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl BackupError {
    /// Create a "source not found" error
    pub fn source_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SourceNotFound { path: path.into() }
    }

    /// Create a "source unreadable" error
    pub fn source_unreadable(path: impl Into<PathBuf>) -> Self {
        Self::SourceUnreadable { path: path.into() }
    }

    /// Create a "destination unwritable" error
    pub fn destination_unwritable(path: impl Into<PathBuf>) -> Self {
        Self::DestinationUnwritable { path: path.into() }
    }

    /// Create a "destination directory unwritable" error
    pub fn destination_dir_unwritable(path: impl Into<PathBuf>) -> Self {
        Self::DestinationDirUnwritable { path: path.into() }
    }

    /// Create a "destination path invalid" error
    pub fn destination_path_invalid(path: impl Into<PathBuf>) -> Self {
        Self::DestinationPathInvalid { path: path.into() }
    }

    /// Create a "malformed source" error
    pub fn malformed_source(path: impl Into<PathBuf>) -> Self {
        Self::MalformedSource { path: path.into() }
    }

    /// Stable label for this error kind, used in `Kind: message` lines
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnsupportedRuntime { .. } => "UnsupportedRuntime",
            Self::SourceNotFound { .. } => "SourceNotFound",
            Self::SourceUnreadable { .. } => "SourceUnreadable",
            Self::DestinationUnwritable { .. } => "DestinationUnwritable",
            Self::DestinationDirUnwritable { .. } => "DestinationDirUnwritable",
            Self::DestinationPathInvalid { .. } => "DestinationPathInvalid",
            Self::MalformedSource { .. } => "MalformedSource",
            Self::Database(_) => "Database",
            Self::Io(_) => "Io",
        }
    }

    /// Check if this is an expected operational failure
    ///
    /// Expected failures are reported on the console as a single
    /// `Kind: message` line; everything else is written to the run log
    /// only.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Io(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for BackupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for BackupError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result type alias for sqbak operations
pub type BackupResult<T> = Result<T, BackupError>;
