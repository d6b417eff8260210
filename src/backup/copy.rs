//! Online database copy
//!
//! Drives SQLite's backup API from a read-only source connection into
//! the destination. The whole database transfers in one step inside the
//! destination's transaction, so a failed run leaves the destination
//! exactly as it was.

use std::path::Path;

use rusqlite::backup::{Backup, StepResult};
use rusqlite::{Connection, ErrorCode, OpenFlags};

use crate::backup::check::check_files;
use crate::error::{BackupError, BackupResult};

/// Run the full backup pipeline for a source and destination pair
///
/// Validates both paths with [`check_files`], then copies the database
/// with [`copy_database`]. This is the one entry point the command line
/// front end calls.
pub fn backup_database(source: &Path, destination: &Path) -> BackupResult<()> {
    check_files(source, destination)?;
    copy_database(source, destination)
}

/// Copy the full contents of `source` into `destination`
///
/// Opens the source read-only, confirms it really is a SQLite database,
/// creates or opens the destination, and transfers every page in one
/// backup step. Both connections are closed explicitly so a close-time
/// error surfaces instead of disappearing in a drop.
///
/// Callers normally reach this through [`backup_database`], which
/// validates both paths first.
pub fn copy_database(source: &Path, destination: &Path) -> BackupResult<()> {
    let src = Connection::open_with_flags(
        source,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    verify_source(&src, source)?;

    let mut dst = match Connection::open(destination) {
        Ok(conn) => conn,
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::CannotOpen => {
            return Err(BackupError::destination_path_invalid(destination));
        }
        Err(err) => return Err(err.into()),
    };

    run_backup(&src, &mut dst)?;

    dst.close().map_err(|(_, err)| BackupError::from(err))?;
    src.close().map_err(|(_, err)| BackupError::from(err))?;

    Ok(())
}

/// Confirm the source actually contains a SQLite database
///
/// The read-only open is lazy; nothing touches the file until a
/// statement runs. Reading the schema version forces the header parse,
/// so a plain text file is rejected before the destination is even
/// created.
fn verify_source(conn: &Connection, source: &Path) -> BackupResult<()> {
    match conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0)) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::NotADatabase => {
            Err(BackupError::malformed_source(source))
        }
        Err(err) => Err(err.into()),
    }
}

/// Transfer every page from `src` to `dst` in a single step
fn run_backup(src: &Connection, dst: &mut Connection) -> BackupResult<()> {
    let backup = Backup::new(src, dst)?;
    match backup.step(-1)? {
        StepResult::Done => Ok(()),
        step => Err(BackupError::Database(format!(
            "backup stopped before completion: {step:?}"
        ))),
    }
}
