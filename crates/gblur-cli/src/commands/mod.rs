//! Subcommand implementations.

pub mod batch;
pub mod blur;
pub mod kernel;

use anyhow::{Context, Result};
use gblur_core::PixelBuffer;
use gblur_io::Format;
use std::path::Path;

/// Decodes an image, attaching the path to any error.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    gblur_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Encodes an image. `quality` only applies to JPEG output.
pub fn save_image(path: &Path, image: &PixelBuffer, quality: Option<u8>) -> Result<()> {
    let result = match (Format::from_extension(path), quality) {
        (Format::Jpeg, Some(q)) => gblur_io::jpeg::write_with_quality(path, image, q),
        _ => gblur_io::write(path, image),
    };
    result.with_context(|| format!("Failed to save: {}", path.display()))
}
