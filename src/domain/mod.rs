//! Domain types and models

mod file_pair;
mod vignette;

pub use file_pair::{FilePair, MissingMask, NamingRules};
pub(crate) use file_pair::file_name_of;
pub use vignette::Vignette;
