//! Run log line formats

use super::mirror::MirrorError;
use super::pairs::DirectoryListing;
use crate::authoring::SaveError;

pub const BEGIN_MARKER: &str = "****Begin Process***";
/// The trailing newline leaves a blank line between consecutive runs
pub const END_MARKER: &str = "****End Process***\n";

/// Placeholder label for a directory without subdirectories
pub const NO_SUBDIRECTORIES: &str = "*Root*";

/// Width file names are padded to in per-file lines
const NAME_WIDTH: usize = 50;

pub fn mirror_failed(error: &MirrorError) -> String {
    format!("Directory not copied. Error: {}", error)
}

pub fn directory(listing: &DirectoryListing) -> String {
    if listing.subdirectories.is_empty() {
        format!("Directory: {}", NO_SUBDIRECTORIES)
    } else {
        format!("Directory: [{}]", listing.subdirectories.join(", "))
    }
}

pub fn processed(file_name: &str) -> String {
    format!("\t{:<width$} : Successfully processed", file_name, width = NAME_WIDTH)
}

pub fn not_processed(file_name: &str, mask_file_name: &str) -> String {
    format!(
        "\t{:<width$} : Not Processed - corresponding file [{}] does not exist",
        file_name,
        mask_file_name,
        width = NAME_WIDTH
    )
}

pub fn save_failed(error: &SaveError) -> String {
    format!("\t Error: {}", error)
}
