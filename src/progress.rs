//! Append-only milestone run log
//!
//! Each pipeline stage records one timestamped line to a plain text file.
//! No rotation, no structured fields; the file is the run's audit trail.

use chrono::Local;
use eyre::{Context, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Timestamp layout for milestone lines, e.g. `2026-Aug-07-14:03:21`
pub const TIMESTAMP_FORMAT: &str = "%Y-%b-%d-%H:%M:%S";

/// Milestone log writer.
///
/// # Example
/// ```no_run
/// use bankcap::progress::ProgressLog;
///
/// # fn example() -> eyre::Result<()> {
/// let progress = ProgressLog::new("code_log.txt");
/// progress.record("Preliminaries complete. Initiating ETL process")?;
/// # Ok(())
/// # }
/// ```
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append one `timestamp : message` line
    ///
    /// # Errors
    /// Returns an error if the log file cannot be opened or written
    pub fn record(&self, message: &str) -> Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open run log: {}", self.path.display()))?;

        writeln!(file, "{} : {}", timestamp, message)
            .with_context(|| format!("Failed to write run log: {}", self.path.display()))?;

        log::debug!("Milestone: {}", message);

        Ok(())
    }
}
