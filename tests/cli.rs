//! End-to-end tests for the sqbak binary
//!
//! Each test runs the real binary inside its own temporary working
//! directory, so the default backup.log and any destination files land
//! in an isolated place.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use rusqlite::Connection;
use tempfile::TempDir;

fn sqbak(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sqbak").unwrap();
    cmd.current_dir(dir.path()).env_remove("SQBAK_LOG_FILE");
    cmd
}

fn create_populated_db(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE actors (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
         INSERT INTO actors (id, name) VALUES (1, 'a'), (2, 'b');",
    )
    .unwrap();
    conn.close().unwrap();
    path
}

fn read_rows(path: &Path) -> Vec<(i64, String)> {
    let conn = Connection::open(path).unwrap();
    let mut stmt = conn.prepare("SELECT id, name FROM actors").unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
        .unwrap()
        .collect::<rusqlite::Result<Vec<_>>>()
        .unwrap();
    rows
}

fn read_log(dir: &TempDir) -> String {
    fs::read_to_string(dir.path().join("backup.log")).unwrap()
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
fn running_as_root() -> bool {
    unsafe { libc::getuid() == 0 }
}

#[test]
fn test_successful_backup() {
    let temp = TempDir::new().unwrap();
    let source = create_populated_db(&temp, "source.db");

    sqbak(&temp)
        .args(["source.db", "backup.db"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let destination = temp.path().join("backup.db");
    let expected = vec![(1, "a".to_string()), (2, "b".to_string())];
    assert_eq!(read_rows(&source), expected);
    assert_eq!(read_rows(&destination), expected);

    let log = read_log(&temp);
    assert!(log.contains("INFO: Backup complete. No errors."));
}

#[test]
fn test_missing_source_reported_and_logged() {
    let temp = TempDir::new().unwrap();

    sqbak(&temp)
        .args(["missing.db", "backup.db"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "SourceNotFound: Source database does not exist or is not a regular file",
        ));

    let log = read_log(&temp);
    assert!(log.contains("ERROR: SourceNotFound"));
    assert!(!temp.path().join("backup.db").exists());
}

#[test]
fn test_malformed_source_reported_and_logged() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.db"), "Random text!!").unwrap();

    sqbak(&temp)
        .args(["notes.db", "backup.db"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("MalformedSource"));

    let log = read_log(&temp);
    assert!(log.contains("ERROR: MalformedSource"));
    assert!(!temp.path().join("backup.db").exists());
}

#[test]
fn test_missing_destination_directory() {
    let temp = TempDir::new().unwrap();
    create_populated_db(&temp, "source.db");

    sqbak(&temp)
        .args(["source.db", "no_such_dir/backup.db"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("DestinationPathInvalid"));

    let log = read_log(&temp);
    assert!(log.contains("ERROR: DestinationPathInvalid"));
}

#[cfg(unix)]
#[test]
fn test_read_only_destination() {
    if running_as_root() {
        return;
    }

    let temp = TempDir::new().unwrap();
    create_populated_db(&temp, "source.db");
    let destination = create_populated_db(&temp, "backup.db");
    set_mode(&destination, 0o444);
    let before = fs::read(&destination).unwrap();

    sqbak(&temp)
        .args(["source.db", "backup.db"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("DestinationUnwritable"));

    // The failed run must leave the old backup byte-for-byte intact.
    assert_eq!(fs::read(&destination).unwrap(), before);
    assert!(read_log(&temp).contains("ERROR: DestinationUnwritable"));
}

#[test]
fn test_unexpected_failure_is_log_only() {
    let temp = TempDir::new().unwrap();
    create_populated_db(&temp, "source.db");
    let destination = temp.path().join("backup.db");
    fs::write(&destination, "Random text!!").unwrap();

    // Both paths pass the precondition checks; the engine rejects the
    // destination mid-copy. That failure class keeps the console clean
    // and is recorded in the log alone.
    sqbak(&temp)
        .args(["source.db", "backup.db"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    let log = read_log(&temp);
    assert!(log.contains("ERROR: Database"));
    assert!(!log.contains("MalformedSource"));
}

#[test]
fn test_log_appends_across_runs() {
    let temp = TempDir::new().unwrap();
    create_populated_db(&temp, "source.db");

    sqbak(&temp).args(["source.db", "backup.db"]).assert().success();
    sqbak(&temp).args(["missing.db", "backup2.db"]).assert().failure();

    let log = read_log(&temp);
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("INFO: Backup complete. No errors."));
    assert!(lines[1].contains("ERROR: SourceNotFound"));
}

#[test]
fn test_log_path_env_override() {
    let temp = TempDir::new().unwrap();
    create_populated_db(&temp, "source.db");
    let custom_log = temp.path().join("runs").join("history.log");
    fs::create_dir(temp.path().join("runs")).unwrap();

    sqbak(&temp)
        .env("SQBAK_LOG_FILE", &custom_log)
        .args(["source.db", "backup.db"])
        .assert()
        .success();

    assert!(custom_log.exists());
    assert!(!temp.path().join("backup.log").exists());
    let log = fs::read_to_string(&custom_log).unwrap();
    assert!(log.contains("INFO: Backup complete. No errors."));
}

#[test]
fn test_missing_arguments() {
    let temp = TempDir::new().unwrap();

    sqbak(&temp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_timestamp_prefix_in_log() {
    let temp = TempDir::new().unwrap();
    create_populated_db(&temp, "source.db");

    sqbak(&temp).args(["source.db", "backup.db"]).assert().success();

    // MM/DD/YYYY HH:MM:SS AM|PM LEVEL: message
    let log = read_log(&temp);
    let line = log.lines().next().unwrap();
    assert!(chrono::NaiveDateTime::parse_from_str(&line[..19], "%m/%d/%Y %H:%M:%S").is_ok());
    let marker = &line[20..22];
    assert!(marker == "AM" || marker == "PM");
}
