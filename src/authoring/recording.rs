//! Recording authoring backend for tests
//!
//! Images are plain paths. Saves write the vignette as JSON so tests can
//! inspect the output tree, and can be made to fail for chosen file names.

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

use super::traits::{AuthoringError, AuthoringLibrary, AuthoringResult, SaveError};
use crate::domain::{file_name_of, Vignette};

#[derive(Debug, Default)]
pub struct RecordingAuthoring {
    failing_saves: HashSet<String>,
    opened: RefCell<Vec<PathBuf>>,
    saved: RefCell<Vec<PathBuf>>,
}

impl RecordingAuthoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every save targeting a file called `file_name` fail
    pub fn fail_save_of(mut self, file_name: &str) -> Self {
        self.failing_saves.insert(file_name.to_string());
        self
    }

    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.borrow().clone()
    }

    pub fn saved(&self) -> Vec<PathBuf> {
        self.saved.borrow().clone()
    }
}

impl AuthoringLibrary for RecordingAuthoring {
    type Image = PathBuf;

    fn name(&self) -> &'static str {
        "recording"
    }

    fn open_image(&self, path: &Path) -> AuthoringResult<PathBuf> {
        if !path.is_file() {
            return Err(AuthoringError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
            });
        }
        self.opened.borrow_mut().push(path.to_path_buf());
        Ok(path.to_path_buf())
    }

    fn save(&self, vignette: &Vignette<PathBuf>, path: &Path) -> Result<(), SaveError> {
        if self.failing_saves.contains(&file_name_of(path)) {
            return Err(SaveError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied"),
            });
        }

        let bytes = serde_json::to_vec(vignette).map_err(|source| SaveError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, bytes).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.saved.borrow_mut().push(path.to_path_buf());
        Ok(())
    }
}
