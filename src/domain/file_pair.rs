//! Base/mask pairing rules

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

/// File naming conventions used to pair base images with masks
///
/// A base image `J104707_alt4.psd` pairs with the mask
/// `J104707_alt4-mask.png` in the same directory and produces
/// `J104707_alt4.vnt`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NamingRules {
    pub base_extension: String,
    pub mask_suffix: String,
    pub mask_extension: String,
    pub vignette_extension: String,
}

impl NamingRules {
    /// Whether the file extension marks a base image (case-insensitive)
    pub fn is_base_image(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.base_extension))
    }

    /// File name of the mask expected next to `base_path`
    pub fn mask_file_name(&self, base_path: &Path) -> String {
        let stem = base_path
            .file_stem()
            .map(|stem| stem.to_string_lossy())
            .unwrap_or_default();
        format!("{}{}.{}", stem, self.mask_suffix, self.mask_extension)
    }

    /// Mask path candidate for a base image; it may not exist
    pub fn mask_path(&self, base_path: &Path) -> PathBuf {
        base_path.with_file_name(self.mask_file_name(base_path))
    }

    /// Location of the vignette built from `base_path`
    ///
    /// The base path is re-rooted from `source_root` onto `dest_root`.
    /// Paths outside `source_root` keep their own directory.
    pub fn vignette_path(&self, base_path: &Path, source_root: &Path, dest_root: &Path) -> PathBuf {
        let target = match base_path.strip_prefix(source_root) {
            Ok(relative) => dest_root.join(relative),
            Err(_) => base_path.to_path_buf(),
        };
        target.with_extension(&self.vignette_extension)
    }
}

impl Default for NamingRules {
    fn default() -> Self {
        NamingRules {
            base_extension: "psd".to_string(),
            mask_suffix: "-mask".to_string(),
            mask_extension: "png".to_string(),
            vignette_extension: "vnt".to_string(),
        }
    }
}

/// A base image together with its existing mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    pub base_path: PathBuf,
    pub mask_path: PathBuf,
}

impl FilePair {
    /// Pair `base_path` with its mask, if the mask exists on disk
    pub fn resolve(base_path: &Path, rules: &NamingRules) -> Result<Self, MissingMask> {
        let mask_path = rules.mask_path(base_path);
        if mask_path.is_file() {
            Ok(FilePair {
                base_path: base_path.to_path_buf(),
                mask_path,
            })
        } else {
            Err(MissingMask {
                mask_file_name: rules.mask_file_name(base_path),
            })
        }
    }

    /// File name of the base image, for log lines
    pub fn base_file_name(&self) -> String {
        file_name_of(&self.base_path)
    }
}

/// A base image whose mask sibling is absent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingMask {
    pub mask_file_name: String,
}

pub(crate) fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_extension_is_case_insensitive() {
        let rules = NamingRules::default();
        assert!(rules.is_base_image(Path::new("in/A.psd")));
        assert!(rules.is_base_image(Path::new("in/A.PSD")));
        assert!(!rules.is_base_image(Path::new("in/A-mask.png")));
        assert!(!rules.is_base_image(Path::new("in/psd")));
    }

    #[test]
    fn test_mask_name_replaces_extension() {
        let rules = NamingRules::default();
        assert_eq!(rules.mask_file_name(Path::new("J104707_alt4.psd")), "J104707_alt4-mask.png");
        assert_eq!(rules.mask_file_name(Path::new("J104707.PSD")), "J104707-mask.png");
        assert_eq!(rules.mask_path(Path::new("in/sub/B.psd")), PathBuf::from("in/sub/B-mask.png"));
    }

    #[test]
    fn test_vignette_path_is_rerooted() {
        let rules = NamingRules::default();
        let path = rules.vignette_path(
            Path::new("/data/InputFiles/trucks/A.psd"),
            Path::new("/data/InputFiles"),
            Path::new("/data/OutputFiles"),
        );
        assert_eq!(path, PathBuf::from("/data/OutputFiles/trucks/A.vnt"));
    }

    #[test]
    fn test_vignette_path_only_rewrites_the_root_segment() {
        let rules = NamingRules::default();
        let path = rules.vignette_path(
            Path::new("/data/InputFiles/InputFiles/A.psd"),
            Path::new("/data/InputFiles"),
            Path::new("/data/OutputFiles"),
        );
        assert_eq!(path, PathBuf::from("/data/OutputFiles/InputFiles/A.vnt"));
    }

    #[test]
    fn test_resolve_requires_existing_mask() {
        let dir = TempDir::new().unwrap();
        let rules = NamingRules::default();
        std::fs::write(dir.path().join("A.psd"), b"").unwrap();
        std::fs::write(dir.path().join("A-mask.png"), b"").unwrap();
        std::fs::write(dir.path().join("B.psd"), b"").unwrap();

        let pair = FilePair::resolve(&dir.path().join("A.psd"), &rules).unwrap();
        assert_eq!(pair.mask_path, dir.path().join("A-mask.png"));
        assert_eq!(pair.base_file_name(), "A.psd");

        let missing = FilePair::resolve(&dir.path().join("B.psd"), &rules).unwrap_err();
        assert_eq!(missing.mask_file_name, "B-mask.png");
    }

    #[test]
    fn test_directory_named_like_mask_is_not_a_mask() {
        let dir = TempDir::new().unwrap();
        let rules = NamingRules::default();
        std::fs::write(dir.path().join("A.psd"), b"").unwrap();
        std::fs::create_dir(dir.path().join("A-mask.png")).unwrap();

        let missing = FilePair::resolve(&dir.path().join("A.psd"), &rules).unwrap_err();
        assert_eq!(missing.mask_file_name, "A-mask.png");
    }
}
