//! Backup pipeline
//!
//! Splits the work into two stages: `check` validates the source and
//! destination paths without touching either file, and `copy` performs
//! the online page transfer.

pub mod check;
pub mod copy;

pub use check::check_files;
pub use copy::{backup_database, copy_database};
