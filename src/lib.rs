//! sqbak - Safe online backup tool for SQLite database files
//!
//! This library provides the core functionality for the sqbak command
//! line tool. It validates a source/destination path pair, then uses
//! SQLite's online backup API to produce a complete replica of the
//! source database, recording every attempt in an append-only log.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `error`: Custom error types
//! - `runtime`: SQLite library version gate
//! - `backup`: Precondition checks and the online copy
//! - `logging`: Append-only run log
//!
//! # Example
//!
//! ```rust,ignore
//! use std::path::Path;
//!
//! use sqbak::backup_database;
//!
//! backup_database(Path::new("app.db"), Path::new("app-backup.db"))?;
//! ```

pub mod backup;
pub mod error;
pub mod logging;
pub mod runtime;

pub use backup::{backup_database, check_files, copy_database};
pub use error::{BackupError, BackupResult};
pub use logging::RunLog;
pub use runtime::ensure_supported_runtime;
