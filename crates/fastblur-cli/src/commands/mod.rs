//! CLI command implementations

pub mod blur;
pub mod resize;

use anyhow::{Context, Result};
use fastblur_io::{ImageData, RawFormat};
use std::path::Path;

/// Load image from path, as raw bytes when a raw format is given
pub fn load_image(path: &Path, raw: Option<&RawFormat>) -> Result<ImageData> {
    match raw {
        Some(format) => fastblur_io::read_raw(path, format),
        None => fastblur_io::read(path),
    }
    .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path
pub fn save_image(path: &Path, image: &ImageData) -> Result<()> {
    fastblur_io::write(path, image)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
