use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sqbak::logging::RunLog;
use sqbak::runtime::ensure_supported_runtime;
use sqbak::{backup_database, BackupError, BackupResult};

#[derive(Parser)]
#[command(
    name = "sqbak",
    author = "Kaylee Beyene",
    version,
    about = "Safe online backup tool for SQLite database files",
    long_about = "sqbak copies a live SQLite database into a backup file using \
                  SQLite's online backup API. The copy is transactional, so the \
                  destination is either left untouched or becomes a complete \
                  replica of the source. Every attempt is recorded in backup.log."
)]
struct Cli {
    /// Database file to back up
    source: PathBuf,

    /// File the backup is written to
    destination: PathBuf,
}

fn main() -> ExitCode {
    let log = RunLog::from_env();

    match run() {
        Ok(()) => {
            if let Err(err) = log.info("Backup complete. No errors.") {
                eprintln!("warning: {}", err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            report_failure(&log, &err);
            ExitCode::FAILURE
        }
    }
}

/// Gate on the linked SQLite, parse arguments, run the backup
///
/// The version gate runs before argument parsing so an unsupported
/// library is reported the same way no matter what was typed.
fn run() -> BackupResult<()> {
    ensure_supported_runtime()?;

    let cli = Cli::parse();
    backup_database(&cli.source, &cli.destination)
}

/// Print expected failures for the operator and log every failure
///
/// Operational mistakes (bad paths, bad permissions, a source that is
/// not a database) get a one-line console message. Unexpected engine
/// or I/O errors only reach the log.
fn report_failure(log: &RunLog, err: &BackupError) {
    let line = format!("{}: {}", err.kind(), err);

    if err.is_expected() {
        println!("{}", line);
    }

    // A failed log write must not replace the real outcome; the run
    // still exits non-zero for the backup error itself.
    if let Err(log_err) = log.error(&line) {
        eprintln!("warning: {}", log_err);
    }
}
