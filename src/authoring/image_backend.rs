//! Native authoring backend built on the `image` crate
//!
//! Images are probed rather than fully decoded: PSD files through their
//! header, every other raster format through `image`'s format sniffing.
//! Vignettes are written as JSON documents describing the illumination
//! layer and the object tree.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use image::io::Reader as ImageReader;
use serde::Serialize;
use tracing::debug;

use super::psd::{self, PsdHeader, PsdHeaderError};
use super::traits::{AuthoringError, AuthoringLibrary, AuthoringResult, SaveError};
use crate::domain::Vignette;

/// Format tag written at the top of every vignette document
pub const DOCUMENT_FORMAT: &str = "vignette";
pub const DOCUMENT_VERSION: u32 = 1;

/// Image handle of the native backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceImage {
    pub path: PathBuf,
    pub format: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Serialize)]
struct VignetteDocument<'a> {
    format: &'static str,
    version: u32,
    created_at: DateTime<Utc>,
    #[serde(flatten)]
    vignette: &'a Vignette<SourceImage>,
}

/// Authoring backend that probes images on disk and writes JSON vignettes
#[derive(Debug, Default, Clone)]
pub struct ImageAuthoring;

impl ImageAuthoring {
    pub fn new() -> Self {
        ImageAuthoring
    }

    fn open_psd(&self, path: &Path) -> AuthoringResult<SourceImage> {
        let header = PsdHeader::read(path).map_err(|e| match e {
            PsdHeaderError::Io(source) => AuthoringError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => AuthoringError::Unsupported {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })?;

        debug!(
            path = %path.display(),
            channels = header.channels,
            depth = header.depth,
            color_mode = ?header.color_mode,
            "Read PSD header"
        );

        Ok(SourceImage {
            path: path.to_path_buf(),
            format: (if header.version == 2 { "psb" } else { "psd" }).to_string(),
            width: header.width,
            height: header.height,
        })
    }

    fn open_raster(&self, path: &Path) -> AuthoringResult<SourceImage> {
        let io_error = |source| AuthoringError::Io {
            path: path.to_path_buf(),
            source,
        };

        let reader = ImageReader::open(path)
            .map_err(io_error)?
            .with_guessed_format()
            .map_err(io_error)?;

        let format = reader.format().ok_or_else(|| AuthoringError::Unsupported {
            path: path.to_path_buf(),
            reason: "unrecognized image format".to_string(),
        })?;
        let format = format.extensions_str().first().copied().unwrap_or("unknown").to_string();

        let (width, height) = reader.into_dimensions().map_err(|source| AuthoringError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(SourceImage {
            path: path.to_path_buf(),
            format,
            width,
            height,
        })
    }
}

/// Whether the file starts with the PSD signature
fn has_psd_signature(path: &Path) -> std::io::Result<bool> {
    let mut signature = [0u8; 4];
    let mut file = File::open(path)?;
    let read = file.read(&mut signature)?;
    Ok(read == signature.len() && &signature == psd::SIGNATURE)
}

impl AuthoringLibrary for ImageAuthoring {
    type Image = SourceImage;

    fn name(&self) -> &'static str {
        "image"
    }

    fn open_image(&self, path: &Path) -> AuthoringResult<SourceImage> {
        let is_psd = has_psd_signature(path).map_err(|source| AuthoringError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let image = if is_psd {
            self.open_psd(path)?
        } else {
            self.open_raster(path)?
        };

        debug!(
            path = %image.path.display(),
            format = %image.format,
            width = image.width,
            height = image.height,
            "Opened image"
        );

        Ok(image)
    }

    fn save(&self, vignette: &Vignette<SourceImage>, path: &Path) -> Result<(), SaveError> {
        let document = VignetteDocument {
            format: DOCUMENT_FORMAT,
            version: DOCUMENT_VERSION,
            created_at: Utc::now(),
            vignette,
        };

        let bytes = serde_json::to_vec_pretty(&document).map_err(|source| SaveError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

        std::fs::write(path, &bytes).map_err(|source| SaveError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "Saved vignette");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_open_psd_reads_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.psd");
        std::fs::write(&path, psd::header_bytes(640, 480)).unwrap();

        let image = ImageAuthoring::new().open_image(&path).unwrap();
        assert_eq!(image.format, "psd");
        assert_eq!((image.width, image.height), (640, 480));
    }

    #[test]
    fn test_open_png_sniffs_format() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A-mask.png");
        write_png(&path, 4, 3);

        let image = ImageAuthoring::new().open_image(&path).unwrap();
        assert_eq!(image.format, "png");
        assert_eq!((image.width, image.height), (4, 3));
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = ImageAuthoring::new().open_image(&dir.path().join("nope.psd"));
        assert!(matches!(result, Err(AuthoringError::Io { .. })));
    }

    #[test]
    fn test_open_garbage_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("A.psd");
        std::fs::write(&path, b"not an image at all").unwrap();

        let result = ImageAuthoring::new().open_image(&path);
        assert!(matches!(result, Err(AuthoringError::Unsupported { .. })));
    }

    #[test]
    fn test_save_writes_document() {
        let dir = TempDir::new().unwrap();
        let base_path = dir.path().join("A.psd");
        let mask_path = dir.path().join("A-mask.png");
        std::fs::write(&base_path, psd::header_bytes(8, 8)).unwrap();
        write_png(&mask_path, 8, 8);

        let library = ImageAuthoring::new();
        let base = library.open_image(&base_path).unwrap();
        let mut vignette = library.create_vignette(base.clone()).unwrap();
        vignette.set_illumination(base);
        let mask = library.open_image(&mask_path).unwrap();
        vignette.objects_mut().add_group("car").add_nontexturable_object("color", mask);

        let out = dir.path().join("A.vnt");
        library.save(&vignette, &out).unwrap();

        let document: serde_json::Value = serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(document["format"], DOCUMENT_FORMAT);
        assert_eq!(document["illumination"]["format"], "psd");
        assert_eq!(document["objects"]["groups"][0]["name"], "car");
        assert_eq!(document["objects"]["groups"][0]["objects"][0]["name"], "color");
        assert_eq!(document["objects"]["groups"][0]["objects"][0]["kind"], "non_texturable");
        assert_eq!(document["objects"]["groups"][0]["objects"][0]["image"]["format"], "png");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let library = ImageAuthoring::new();
        let vignette = Vignette::new(SourceImage {
            path: dir.path().join("A.psd"),
            format: "psd".to_string(),
            width: 1,
            height: 1,
        });

        let result = library.save(&vignette, &dir.path().join("missing").join("A.vnt"));
        assert!(matches!(result, Err(SaveError::Io { .. })));
    }
}
