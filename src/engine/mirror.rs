//! Destination tree replication
//!
//! The destination is rebuilt from scratch on every run: any existing tree
//! is removed, then every directory of the source tree is recreated at the
//! same relative path. Files are never copied.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Failed to remove {}: {source}", .path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Source directory {} does not exist", .path.display())]
    MissingSource { path: PathBuf },

    #[error("Failed to create {}: {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Outcome of a mirror pass that got past removing the old tree
#[derive(Debug, Default)]
pub struct MirrorReport {
    /// Directories created, `dest_root` included
    pub created: usize,
    /// Entries that could not be walked or recreated; their siblings still were
    pub errors: Vec<MirrorError>,
}

/// Replace `dest_root` with the directory skeleton of `source_root`
///
/// Failing to clear `dest_root` or a missing `source_root` stops the pass.
/// Unreadable or uncreatable subdirectories are collected in the report
/// and the walk carries on with their siblings.
pub fn mirror(source_root: &Path, dest_root: &Path) -> Result<MirrorReport, MirrorError> {
    remove_existing(dest_root)?;

    if !source_root.is_dir() {
        return Err(MirrorError::MissingSource {
            path: source_root.to_path_buf(),
        });
    }

    let mut report = MirrorReport::default();
    for entry in WalkDir::new(source_root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                let path = source.path().unwrap_or(source_root).to_path_buf();
                warn!(path = %path.display(), error = %source, "Directory not walked");
                report.errors.push(MirrorError::Walk { path, source });
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            continue;
        };
        let target = dest_root.join(relative);
        match std::fs::create_dir_all(&target) {
            Ok(()) => report.created += 1,
            Err(source) => report.errors.push(MirrorError::Create { path: target, source }),
        }
    }

    info!(
        source = %source_root.display(),
        dest = %dest_root.display(),
        directories = report.created,
        errors = report.errors.len(),
        "Mirrored directory tree"
    );

    Ok(report)
}

fn remove_existing(dest_root: &Path) -> Result<(), MirrorError> {
    let Ok(metadata) = std::fs::symlink_metadata(dest_root) else {
        return Ok(());
    };

    debug!(dest = %dest_root.display(), "Removing previous output tree");
    let removed = if metadata.is_dir() {
        std::fs::remove_dir_all(dest_root)
    } else {
        std::fs::remove_file(dest_root)
    };

    removed.map_err(|source| MirrorError::Remove {
        path: dest_root.to_path_buf(),
        source,
    })
}
