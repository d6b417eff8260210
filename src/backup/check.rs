//! Pre-flight filesystem checks
//!
//! Validates a (source, destination) path pair before any database
//! handle is opened. The checks run in a fixed order and stop at the
//! first violation, so a given environment always reports the same
//! error. Nothing here creates, deletes, or opens a file; only metadata
//! and permission bits are inspected.

use std::path::Path;

use crate::error::{BackupError, BackupResult};

/// Validate source and destination paths before a backup
///
/// Checks, in order:
/// 1. the source exists and is a regular file,
/// 2. the source is readable by this process,
/// 3. an already-existing destination is writable,
/// 4. an already-existing destination parent directory is writable
///    (the copy creates journal and temporary files alongside the
///    destination).
///
/// A destination whose parent directory does not exist passes these
/// checks; opening it fails in the copy step with
/// [`BackupError::DestinationPathInvalid`].
pub fn check_files(source: &Path, destination: &Path) -> BackupResult<()> {
    if !source.is_file() {
        return Err(BackupError::source_not_found(source));
    }

    if !readable(source) {
        return Err(BackupError::source_unreadable(source));
    }

    if destination.exists() && !writable(destination) {
        return Err(BackupError::destination_unwritable(destination));
    }

    if let Some(parent) = parent_dir(destination) {
        if parent.exists() && !writable(parent) {
            return Err(BackupError::destination_dir_unwritable(parent));
        }
    }

    Ok(())
}

/// Parent directory used for the writability check
///
/// A bare filename has no parent component; the check then applies to
/// the current directory. Root paths have no parent at all.
fn parent_dir(path: &Path) -> Option<&Path> {
    match path.parent() {
        Some(p) if p.as_os_str().is_empty() => Some(Path::new(".")),
        other => other,
    }
}

/// Probe read permission with real-uid semantics, as access(2) defines
#[cfg(unix)]
fn readable(path: &Path) -> bool {
    access(path, libc::R_OK)
}

/// Probe write permission with real-uid semantics, as access(2) defines
#[cfg(unix)]
fn writable(path: &Path) -> bool {
    access(path, libc::W_OK)
}

#[cfg(unix)]
fn access(path: &Path, mode: libc::c_int) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    // A path with an interior NUL cannot name a real file.
    match CString::new(path.as_os_str().as_bytes()) {
        Ok(path) => unsafe { libc::access(path.as_ptr(), mode) == 0 },
        Err(_) => false,
    }
}

/// Probe read permission; metadata visibility stands in for access(2)
#[cfg(not(unix))]
fn readable(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}

/// Probe write permission via the read-only attribute
#[cfg(not(unix))]
fn writable(path: &Path) -> bool {
    std::fs::metadata(path)
        .map(|m| !m.permissions().readonly())
        .unwrap_or(false)
}
