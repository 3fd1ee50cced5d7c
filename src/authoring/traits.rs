//! Authoring library contract
//!
//! The vignette authoring library is an opaque collaborator. The batch run
//! only needs four things from it: open an image, create a vignette from a
//! base image, populate the vignette's object tree, and persist it. Object
//! tree population works on the in-memory [`Vignette`] model, so a backend
//! only implements opening, creation and saving.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::Vignette;

// ============================================================================
// Error Types
// ============================================================================

/// Failures while opening images or creating vignettes
#[derive(Debug, Error)]
pub enum AuthoringError {
    #[error("Failed to read image {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported image {}: {reason}", .path.display())]
    Unsupported { path: PathBuf, reason: String },
}

/// Failures while persisting a vignette
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Failed to write vignette {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode vignette {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for authoring operations
pub type AuthoringResult<T> = Result<T, AuthoringError>;

// ============================================================================
// Library Trait
// ============================================================================

/// Image/vignette authoring backend
pub trait AuthoringLibrary {
    /// Handle to an opened image
    type Image: Clone;

    /// Short backend name for diagnostics
    fn name(&self) -> &'static str;

    /// Open the image stored at `path`
    fn open_image(&self, path: &Path) -> AuthoringResult<Self::Image>;

    /// Create a vignette built around `base`
    fn create_vignette(&self, base: Self::Image) -> AuthoringResult<Vignette<Self::Image>> {
        Ok(Vignette::new(base))
    }

    /// Persist `vignette` at `path`
    fn save(&self, vignette: &Vignette<Self::Image>, path: &Path) -> Result<(), SaveError>;
}
