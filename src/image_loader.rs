//! Still-image frame loading
//!
//! Loads PNG and JPEG files as RGB frames so recorded faces can be fed
//! through the same pipeline as live camera frames.

use crate::error::{Result, ScanError};
use image::{ImageReader, RgbImage};
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Load an image file as an RGB frame
///
/// # Errors
///
/// Returns `ScanError::ImageLoadError` if the extension is not supported or
/// the file cannot be opened or decoded.
pub fn load_frame(path: &Path) -> Result<RgbImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(ScanError::ImageLoadError {
            message: format!("unsupported image format: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        ScanError::image_load(format!("failed to open image file: {}", path.display()), e)
    })?;
    let img = reader.decode().map_err(|e| {
        ScanError::image_load(format!("failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png"]
}
