//! Append-only run log
//!
//! Every processing decision of a batch run is recorded as one
//! tab-separated, timestamped line in a plain text file.

mod run_log;

pub use run_log::RunLog;
