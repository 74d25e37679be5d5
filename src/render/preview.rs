//! # Print Preview
//!
//! Renders a [`MonoImage`] as a grayscale PNG. A 384-dot image is tiny on a
//! modern screen, so previews are upscaled by a whole factor with
//! nearest-neighbour sampling; any smoothing would blur the dither pattern
//! the preview exists to show.

use std::path::Path;

use image::{GrayImage, ImageEncoder, Luma};

use super::mono::MonoImage;
use crate::error::TintaError;

/// Largest integer upscale applied to previews.
pub const PREVIEW_MAX_SCALE: u32 = 4;

/// Previews grow until they reach at least this width (if the max scale allows).
pub const PREVIEW_MIN_TARGET_WIDTH: u32 = 800;

/// Pick the preview upscale factor for an image `width` dots wide.
///
/// The largest factor `s ≤ 4` with `width × s ≤ 800`, and never below 1.
///
/// ```
/// use tinta::render::preview::preview_scale;
///
/// assert_eq!(preview_scale(384), 2);
/// assert_eq!(preview_scale(200), 4);
/// assert_eq!(preview_scale(1000), 1);
/// ```
pub fn preview_scale(width: u32) -> u32 {
    let mut scale = 1;
    while scale < PREVIEW_MAX_SCALE && width * (scale + 1) <= PREVIEW_MIN_TARGET_WIDTH {
        scale += 1;
    }
    scale
}

/// Render the image at `scale`× with nearest-neighbour sampling.
///
/// Black pixels become 0, white pixels 255.
pub fn to_gray_image(img: &MonoImage, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let width = img.width() as u32 * scale;
    let height = img.height() as u32 * scale;

    GrayImage::from_fn(width, height, |x, y| {
        let black = img.get((x / scale) as usize, (y / scale) as usize);
        Luma([if black { 0u8 } else { 255u8 }])
    })
}

/// Encode the image as PNG bytes at `scale`×.
pub fn to_png(img: &MonoImage, scale: u32) -> Result<Vec<u8>, TintaError> {
    let gray = to_gray_image(img, scale);

    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            gray.as_raw(),
            gray.width(),
            gray.height(),
            image::ExtendedColorType::L8,
        )
        .map_err(|e| TintaError::Image(format!("Failed to encode PNG: {}", e)))?;

    Ok(png_bytes)
}

/// Save the image as a PNG file at `scale`×.
pub fn save_png(img: &MonoImage, scale: u32, path: &Path) -> Result<(), TintaError> {
    let bytes = to_png(img, scale)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
