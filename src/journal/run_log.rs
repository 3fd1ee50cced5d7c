//! Timestamped text log opened in append mode for every entry

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::debug;

/// Local time format used for every entry
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle to the run log file
///
/// The file is reopened for each entry, so nothing is held open between
/// writes and the log only ever grows.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        RunLog { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `"<timestamp>\t<message>\n"` to the log
    pub fn write(&self, message: &str) -> io::Result<()> {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        debug!(log = %self.path.display(), "{}", message.trim());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}\t{}", timestamp, message)?;
        file.flush()
    }
}
