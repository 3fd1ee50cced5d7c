//! Base/mask pair discovery
//!
//! The source tree is walked depth-first in file name order. Each visited
//! directory yields a [`DirectoryListing`]; the base images of a listing are
//! then classified as paired or unpaired.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::domain::{file_name_of, FilePair, MissingMask, NamingRules};

/// Immediate contents of one visited directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryListing {
    pub path: PathBuf,
    /// Names of the immediate subdirectories
    pub subdirectories: Vec<String>,
    pub files: Vec<PathBuf>,
}

/// Classification of a base image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    Paired(FilePair),
    Unpaired { base_path: PathBuf, missing: MissingMask },
}

impl Candidate {
    pub fn base_file_name(&self) -> String {
        match self {
            Candidate::Paired(pair) => pair.base_file_name(),
            Candidate::Unpaired { base_path, .. } => file_name_of(base_path),
        }
    }
}

pub struct PairFinder<'a> {
    rules: &'a NamingRules,
}

impl<'a> PairFinder<'a> {
    pub fn new(rules: &'a NamingRules) -> Self {
        PairFinder { rules }
    }

    /// Visit every directory under `root`, `root` first
    ///
    /// Entries that cannot be read are skipped with a warning.
    pub fn directories(&self, root: &Path) -> impl Iterator<Item = DirectoryListing> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| list_directory(entry.path()))
    }

    /// Classify the base images of one directory, in file name order
    pub fn classify(&self, listing: &DirectoryListing) -> Vec<Candidate> {
        listing
            .files
            .iter()
            .filter(|path| self.rules.is_base_image(path))
            .map(|base_path| match FilePair::resolve(base_path, self.rules) {
                Ok(pair) => Candidate::Paired(pair),
                Err(missing) => Candidate::Unpaired {
                    base_path: base_path.clone(),
                    missing,
                },
            })
            .collect()
    }
}

fn list_directory(path: &Path) -> DirectoryListing {
    let mut listing = DirectoryListing {
        path: path.to_path_buf(),
        subdirectories: Vec::new(),
        files: Vec::new(),
    };

    let children = WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for child in children {
        let child = match child {
            Ok(child) => child,
            Err(e) => {
                warn!(dir = %path.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if child.file_type().is_dir() {
            listing.subdirectories.push(child.file_name().to_string_lossy().into_owned());
        } else if child.path().is_file() {
            listing.files.push(child.into_path());
        }
    }

    listing
}
