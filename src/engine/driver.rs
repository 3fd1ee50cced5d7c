//! Batch run orchestration

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::builder::{BuildError, BuildOutcome, VignetteBuilder};
use super::messages;
use super::mirror::mirror;
use super::pairs::{Candidate, PairFinder};
use crate::authoring::AuthoringLibrary;
use crate::config::Settings;
use crate::journal::RunLog;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("Failed to write run log {}: {source}", .path.display())]
    Log {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Counters reported at the end of a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub directories: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Drives one batch run: mirror, discover pairs, build vignettes
pub struct Driver<L> {
    settings: Settings,
    library: L,
    log: RunLog,
}

impl<L: AuthoringLibrary> Driver<L> {
    pub fn new(settings: Settings, library: L) -> Self {
        let log = RunLog::new(settings.log_path());
        Driver { settings, library, log }
    }

    #[cfg(test)]
    pub fn library(&self) -> &L {
        &self.library
    }

    pub fn run(&self) -> Result<RunSummary, DriverError> {
        let source_root = self.settings.source_root();
        let dest_root = self.settings.dest_root();
        let naming = &self.settings.naming;
        let names = &self.settings.vignette;

        info!(
            source = %source_root.display(),
            dest = %dest_root.display(),
            backend = self.library.name(),
            "Starting batch run"
        );

        let mirror_errors = match mirror(&source_root, &dest_root) {
            Ok(report) => report.errors,
            Err(e) => vec![e],
        };
        for e in &mirror_errors {
            warn!(error = %e, "Output tree not fully mirrored");
            self.write_log(&messages::mirror_failed(e))?;
        }

        self.write_log(messages::BEGIN_MARKER)?;

        let finder = PairFinder::new(naming);
        let builder = VignetteBuilder::new(&self.library, naming, &source_root, &dest_root);
        let mut summary = RunSummary::default();

        for listing in finder.directories(&source_root) {
            summary.directories += 1;
            debug!(dir = %listing.path.display(), files = listing.files.len(), "Visiting directory");
            self.write_log(&messages::directory(&listing))?;

            for candidate in finder.classify(&listing) {
                let file_name = candidate.base_file_name();
                match candidate {
                    Candidate::Paired(pair) => {
                        match builder.build(&pair, &names.group_name, &names.object_name)? {
                            BuildOutcome::Saved(path) => {
                                println!("processing {}", file_name);
                                self.write_log(&messages::processed(&file_name))?;
                                info!(file = %file_name, output = %path.display(), "Processed");
                                summary.processed += 1;
                            }
                            BuildOutcome::SaveFailed(e) => {
                                warn!(file = %file_name, error = %e, "Vignette not saved");
                                self.write_log(&messages::save_failed(&e))?;
                                summary.failed += 1;
                            }
                        }
                    }
                    Candidate::Unpaired { missing, .. } => {
                        let line = messages::not_processed(&file_name, &missing.mask_file_name);
                        println!("{}", line);
                        self.write_log(&line)?;
                        summary.skipped += 1;
                    }
                }
            }
        }

        self.write_log(messages::END_MARKER)?;
        Ok(summary)
    }

    fn write_log(&self, message: &str) -> Result<(), DriverError> {
        self.log.write(message).map_err(|source| DriverError::Log {
            path: self.log.path().to_path_buf(),
            source,
        })
    }
}
