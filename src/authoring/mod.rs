//! Vignette authoring backends
//!
//! [`AuthoringLibrary`] is the seam between the batch run and whatever
//! library actually produces vignette files. [`ImageAuthoring`] is the
//! native implementation.

mod image_backend;
mod psd;
mod traits;

#[cfg(test)]
pub mod recording;

#[cfg(test)]
pub use psd::header_bytes as psd_header_fixture;

pub use image_backend::ImageAuthoring;
pub use traits::{AuthoringError, AuthoringLibrary, SaveError};
