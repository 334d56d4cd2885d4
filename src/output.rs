//! PNG output for still export

use image::imageops::FilterType;
use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest side, in pixels, of an exported image after scaling.
pub const MAX_EXPORT_SIDE: u32 = 16384;

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// Scaled image would be larger than [`MAX_EXPORT_SIDE`]
    #[error("{size}px scaled by {factor} exceeds the {max}px export limit")]
    TooLarge { size: u32, factor: u8, max: u32 },
}

/// Path a still export is written to: `path` itself, or `path.png` when it
/// has no extension.
pub fn png_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    }
}

/// Create the parent directory of `path` if it is missing.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Save an RGBA image as PNG.
///
/// The image is encoded in memory first so a failed encode never leaves a
/// truncated file behind.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    let mut bytes = io::Cursor::new(Vec::new());
    image.write_to(&mut bytes, image::ImageOutputFormat::Png)?;

    ensure_parent_dir(path)?;
    std::fs::write(path, bytes.into_inner())?;
    Ok(())
}

/// Side of a `size` canvas scaled by `factor`, or [`OutputError::TooLarge`]
/// past [`MAX_EXPORT_SIDE`].
pub fn scaled_side(size: u32, factor: u8) -> Result<u32, OutputError> {
    size.checked_mul(u32::from(factor.max(1)))
        .filter(|side| *side <= MAX_EXPORT_SIDE)
        .ok_or(OutputError::TooLarge { size, factor, max: MAX_EXPORT_SIDE })
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art.
pub fn scale_image(image: RgbaImage, factor: u8) -> Result<RgbaImage, OutputError> {
    if factor <= 1 {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let new_w = scaled_side(w, factor)?;
    let new_h = scaled_side(h, factor)?;
    Ok(image::imageops::resize(&image, new_w, new_h, FilterType::Nearest))
}
