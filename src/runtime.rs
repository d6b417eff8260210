//! SQLite runtime version gate
//!
//! The online backup API this tool is built on was added in SQLite
//! 3.6.11. The gate runs before anything else in an invocation and
//! refuses to proceed when the linked library is older, so no file is
//! touched on an unsupported runtime.

use crate::error::{BackupError, BackupResult};

/// Minimum SQLite version with the online backup API, in SQLite's
/// numeric encoding (major * 1_000_000 + minor * 1_000 + patch)
pub const MIN_SQLITE_VERSION: i32 = 3_006_011;

/// Source of the SQLite version for the running process
///
/// Production code reads the linked library through [`LinkedSqlite`];
/// tests substitute fixed versions to exercise the gate without an old
/// SQLite build.
pub trait VersionProvider {
    /// Version in SQLite's numeric encoding (e.g. 3045001)
    fn version_number(&self) -> i32;

    /// Human-readable version string (e.g. "3.45.1")
    fn version_string(&self) -> String;
}

/// The SQLite library linked into this process
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedSqlite;

impl VersionProvider for LinkedSqlite {
    fn version_number(&self) -> i32 {
        rusqlite::version_number()
    }

    fn version_string(&self) -> String {
        rusqlite::version().to_string()
    }
}

/// Fail with `UnsupportedRuntime` when the provided version predates
/// the online backup API
pub fn ensure_supported(provider: &dyn VersionProvider) -> BackupResult<()> {
    if provider.version_number() < MIN_SQLITE_VERSION {
        return Err(BackupError::UnsupportedRuntime {
            required: format_version_number(MIN_SQLITE_VERSION),
            found: provider.version_string(),
        });
    }
    Ok(())
}

/// Check the SQLite library linked into this process
pub fn ensure_supported_runtime() -> BackupResult<()> {
    ensure_supported(&LinkedSqlite)
}

/// Render a numeric SQLite version as a dotted string
pub fn format_version_number(version: i32) -> String {
    format!(
        "{}.{}.{}",
        version / 1_000_000,
        (version / 1_000) % 1_000,
        version % 1_000
    )
}
