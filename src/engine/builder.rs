//! Vignette construction for one base/mask pair

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::authoring::{AuthoringError, AuthoringLibrary, SaveError};
use crate::domain::{FilePair, NamingRules};

/// Failures that abort the whole run
#[derive(Debug, Error)]
#[error("Failed to build vignette from {}: {source}", .base_path.display())]
pub struct BuildError {
    pub base_path: PathBuf,
    #[source]
    pub source: AuthoringError,
}

/// Result of building one vignette
#[derive(Debug)]
pub enum BuildOutcome {
    Saved(PathBuf),
    /// The vignette was built but could not be written
    SaveFailed(SaveError),
}

pub struct VignetteBuilder<'a, L> {
    library: &'a L,
    rules: &'a NamingRules,
    source_root: &'a Path,
    dest_root: &'a Path,
}

impl<'a, L: AuthoringLibrary> VignetteBuilder<'a, L> {
    pub fn new(library: &'a L, rules: &'a NamingRules, source_root: &'a Path, dest_root: &'a Path) -> Self {
        VignetteBuilder {
            library,
            rules,
            source_root,
            dest_root,
        }
    }

    /// Where the vignette for `pair` is written
    pub fn output_path(&self, pair: &FilePair) -> PathBuf {
        self.rules.vignette_path(&pair.base_path, self.source_root, self.dest_root)
    }

    /// Build the vignette for `pair` with a single group holding one object
    ///
    /// Save failures are reported as [`BuildOutcome::SaveFailed`]; failing to
    /// open either image is a [`BuildError`].
    pub fn build(&self, pair: &FilePair, group_name: &str, object_name: &str) -> Result<BuildOutcome, BuildError> {
        let output_path = self.output_path(pair);
        let authoring = |source| BuildError {
            base_path: pair.base_path.clone(),
            source,
        };

        let base = self.library.open_image(&pair.base_path).map_err(authoring)?;
        let mut vignette = self.library.create_vignette(base.clone()).map_err(authoring)?;
        vignette.set_illumination(base);

        let mask = self.library.open_image(&pair.mask_path).map_err(authoring)?;
        vignette
            .objects_mut()
            .add_group(group_name)
            .add_nontexturable_object(object_name, mask);

        debug!(
            base = %pair.base_path.display(),
            output = %output_path.display(),
            backend = self.library.name(),
            groups = vignette.objects().groups().len(),
            "Saving vignette"
        );

        match self.library.save(&vignette, &output_path) {
            Ok(()) => Ok(BuildOutcome::Saved(output_path)),
            Err(e) => Ok(BuildOutcome::SaveFailed(e)),
        }
    }
}
