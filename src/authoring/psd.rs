//! Photoshop document header parsing
//!
//! Only the fixed 26-byte file header is read; layer and image data are
//! left to the authoring tool that consumes the vignette.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Length of the fixed PSD/PSB file header
pub const HEADER_LEN: usize = 26;

/// Signature opening every PSD/PSB file
pub const SIGNATURE: &[u8; 4] = b"8BPS";

#[derive(Debug, Error)]
pub enum PsdHeaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Missing 8BPS signature")]
    BadSignature,
    #[error("Unsupported version {0}")]
    BadVersion(u16),
}

/// Color mode stored in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Bitmap,
    Grayscale,
    Indexed,
    Rgb,
    Cmyk,
    Multichannel,
    Duotone,
    Lab,
    Other(u16),
}

impl From<u16> for ColorMode {
    fn from(value: u16) -> Self {
        match value {
            0 => ColorMode::Bitmap,
            1 => ColorMode::Grayscale,
            2 => ColorMode::Indexed,
            3 => ColorMode::Rgb,
            4 => ColorMode::Cmyk,
            7 => ColorMode::Multichannel,
            8 => ColorMode::Duotone,
            9 => ColorMode::Lab,
            other => ColorMode::Other(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PsdHeader {
    /// 1 for PSD, 2 for PSB (large document)
    pub version: u16,
    pub channels: u16,
    pub height: u32,
    pub width: u32,
    pub depth: u16,
    pub color_mode: ColorMode,
}

impl PsdHeader {
    /// Read the header from the start of the file at `path`
    pub fn read(path: &Path) -> Result<Self, PsdHeaderError> {
        let mut bytes = [0u8; HEADER_LEN];
        File::open(path)?.read_exact(&mut bytes)?;
        Self::parse(&bytes)
    }

    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, PsdHeaderError> {
        if &bytes[0..4] != SIGNATURE {
            return Err(PsdHeaderError::BadSignature);
        }

        let be_u16 = |at: usize| u16::from_be_bytes([bytes[at], bytes[at + 1]]);
        let be_u32 = |at: usize| u32::from_be_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);

        let version = be_u16(4);
        if version != 1 && version != 2 {
            return Err(PsdHeaderError::BadVersion(version));
        }

        // bytes 6..12 are reserved
        Ok(PsdHeader {
            version,
            channels: be_u16(12),
            height: be_u32(14),
            width: be_u32(18),
            depth: be_u16(22),
            color_mode: ColorMode::from(be_u16(24)),
        })
    }
}

/// Build a minimal header, for test fixtures
#[cfg(test)]
pub fn header_bytes(width: u32, height: u32) -> [u8; HEADER_LEN] {
    let mut bytes = [0u8; HEADER_LEN];
    bytes[0..4].copy_from_slice(SIGNATURE);
    bytes[4..6].copy_from_slice(&1u16.to_be_bytes());
    bytes[12..14].copy_from_slice(&3u16.to_be_bytes());
    bytes[14..18].copy_from_slice(&height.to_be_bytes());
    bytes[18..22].copy_from_slice(&width.to_be_bytes());
    bytes[22..24].copy_from_slice(&8u16.to_be_bytes());
    bytes[24..26].copy_from_slice(&3u16.to_be_bytes());
    bytes
}
