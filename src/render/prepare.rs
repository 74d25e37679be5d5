//! # Image Preparation
//!
//! Turns a decoded color image into a [`LuminanceField`] that fits the print
//! head: downscaled to the printer width, padded to a whole number of bytes,
//! gamma-corrected and optionally sharpened.
//!
//! ## Steps
//!
//! ```text
//! DynamicImage ──► downscale (Triangle) ──► pad right to ×8 with white
//!              ──► L = 0.299 R + 0.587 G + 0.114 B
//!              ──► (L / 255)^(1 / gamma) × 255
//!              ──► optional unsharp mask (3×3 box, strength 0.5)
//! ```
//!
//! The source image is only read. Every step allocates its own output.

use image::{DynamicImage, RgbaImage, imageops::FilterType};
use tracing::debug;

/// Lowest accepted gamma. Smaller values are clamped.
pub const GAMMA_MIN: f32 = 0.10;

/// Highest accepted gamma. Larger values are clamped.
pub const GAMMA_MAX: f32 = 1.50;

/// Gain applied to the high-pass detail by the unsharp mask.
pub const SHARPEN_STRENGTH: f64 = 0.5;

/// Luminance of padding columns.
pub const WHITE: f64 = 255.0;

/// A row-major grid of luminance samples, nominally in [0, 255].
///
/// Error-diffusion dithering writes into cells it has not visited yet, so
/// the field is consumed by the ditherer rather than shared.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceField {
    width: usize,
    height: usize,
    samples: Vec<f64>,
}

impl LuminanceField {
    /// A field filled with one value.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            samples: vec![value; width * height],
        }
    }

    /// Wrap row-major samples.
    pub fn from_samples(width: usize, height: usize, samples: Vec<f64>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width * height,
            "sample count does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            samples,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f64) {
        self.samples[y * self.width + x] = value;
    }

    /// Add `delta` to the sample at (x, y).
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, delta: f64) {
        self.samples[y * self.width + x] += delta;
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

/// Clamp a gamma value into [`GAMMA_MIN`, `GAMMA_MAX`].
///
/// NaN falls back to neutral (1.0).
pub fn clamp_gamma(gamma: f32) -> f32 {
    if gamma.is_nan() {
        return 1.0;
    }
    gamma.clamp(GAMMA_MIN, GAMMA_MAX)
}

/// Dimensions after downscaling to `max_width`, before padding.
///
/// Images no wider than `max_width` are left alone; wider ones are scaled
/// by `max_width / width` with the height rounded to the nearest row.
///
/// ```
/// use tinta::render::prepare::scaled_dimensions;
///
/// assert_eq!(scaled_dimensions(400, 100, 384), (384, 96));
/// assert_eq!(scaled_dimensions(200, 100, 384), (200, 100));
/// ```
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32) -> (u32, u32) {
    if width <= max_width {
        return (width, height);
    }
    let ratio = max_width as f64 / width as f64;
    let new_height = (height as f64 * ratio).round().max(1.0) as u32;
    (max_width, new_height)
}

/// Round a width up to the next multiple of 8.
#[inline]
pub fn padded_width(width: u32) -> u32 {
    width.div_ceil(8) * 8
}

/// Rec. 601 luma of an 8-bit RGB triple.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64
}

/// Apply inverse gamma to a luminance in [0, 255].
///
/// The exponent is `1 / gamma`: gamma below 1 darkens, above 1 lightens.
#[inline]
pub fn gamma_adjust(luminance: f64, gamma: f32) -> f64 {
    let normalized = luminance / 255.0;
    normalized.powf(1.0 / gamma as f64) * 255.0
}

/// Prepare a source image for dithering.
///
/// ## Parameters
///
/// - `source`: decoded image; alpha is ignored
/// - `max_width`: printer width in dots (384 for a 58mm head)
/// - `gamma`: clamped to [0.10, 1.50]
/// - `sharpen`: apply the unsharp mask after gamma
///
/// ## Returns
///
/// A field whose width is a multiple of 8, no wider than
/// `padded_width(max_width)` and no narrower than `min(source width, max_width)`.
///
/// A zero-sized source is a caller error.
pub fn prepare(source: &DynamicImage, max_width: u32, gamma: f32, sharpen: bool) -> LuminanceField {
    debug_assert!(
        source.width() > 0 && source.height() > 0,
        "cannot prepare an empty image"
    );
    debug_assert!(max_width > 0, "max_width must be positive");

    let gamma = clamp_gamma(gamma);
    let (scaled_w, scaled_h) = scaled_dimensions(source.width(), source.height(), max_width);

    let rgba: RgbaImage = if (scaled_w, scaled_h) != (source.width(), source.height()) {
        image::imageops::resize(source, scaled_w, scaled_h, FilterType::Triangle)
    } else {
        source.to_rgba8()
    };

    let width = padded_width(scaled_w) as usize;
    let height = scaled_h as usize;
    let mut field = LuminanceField::filled(width, height, WHITE);

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        field.set(
            x as usize,
            y as usize,
            gamma_adjust(luminance(r, g, b), gamma),
        );
    }

    debug!(
        source_width = source.width(),
        source_height = source.height(),
        width,
        height,
        gamma,
        sharpen,
        "Prepared luminance field"
    );

    if sharpen {
        unsharp_mask(&field)
    } else {
        field
    }
}

/// Unsharp mask with a 3×3 box blur.
///
/// Each output sample is `own + (own − mean) × 0.5`, clamped to [0, 255],
/// where `mean` averages the in-bounds neighbours (4 at corners, 6 on edges,
/// 9 inside). Reads only from `field`.
pub fn unsharp_mask(field: &LuminanceField) -> LuminanceField {
    let (width, height) = (field.width(), field.height());
    let mut out = LuminanceField::filled(width, height, 0.0);

    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0;
            let mut count = 0u32;
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    sum += field.get(nx, ny);
                    count += 1;
                }
            }
            let own = field.get(x, y);
            let detail = own - sum / count as f64;
            out.set(x, y, (own + detail * SHARPEN_STRENGTH).clamp(0.0, 255.0));
        }
    }

    out
}

// ============================================================================
// TESTS
// ============================================================================
