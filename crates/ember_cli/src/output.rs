//! Writing the rendered image to disk.

use anyhow::{Context, Result};
use ember_renderer::ImageBuffer;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Work out the encoder from the file extension.
///
/// Called before rendering so a bad path fails fast.
pub fn output_format(path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(path)
        .with_context(|| format!("cannot pick an image format for {}", path.display()))
}

/// Tone-map the render and encode it to `path`.
pub fn save_image(image: &ImageBuffer, path: &Path, format: ImageFormat) -> Result<()> {
    let rgb = RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("rendered pixel count does not match image dimensions")?;

    rgb.save_with_format(path, format)
        .with_context(|| format!("failed to write {}", path.display()))
}
