//! # Dithering
//!
//! This module converts a [`LuminanceField`] into a 1-bit [`MonoImage`]
//! suitable for a thermal printer, using one of four algorithms.
//!
//! ## What is Dithering?
//!
//! Dithering simulates grayscale on a device that can only print black or white.
//! By varying the density of black dots, we create the illusion of different
//! gray levels.
//!
//! ```text
//! Grayscale:    White    Light    Medium    Dark    Black
//!               ░░░░░░   ░░▒░░░   ░▒░▒░▒   ▒▓▒▓▒▓   ██████
//! ```
//!
//! ## Algorithms
//!
//! | Mode | Kind | Error kept | Character |
//! |------|------|------------|-----------|
//! | Atkinson | Error diffusion | 6/8 | High contrast, clean whites |
//! | Floyd-Steinberg | Error diffusion | 16/16 | Smooth tones, some worms |
//! | Ordered 8x8 | Bayer matrix | n/a | Regular halftone screen |
//! | None | Flat threshold | n/a | Posterized |
//!
//! All modes scan row-major, top to bottom, left to right, and decide every
//! pixel exactly once. Error diffusion only ever writes to pixels that have
//! not been decided yet.
//!
//! ## Threshold and Invert
//!
//! Error-diffusion and flat modes quantize with `old < threshold → black`.
//! The ordered mode instead shifts the luminance by `128 − threshold` so the
//! threshold moves the image brightness, not the matrix.
//!
//! `invert` flips the output bit after the decision. The diffused error is
//! always the pre-invert error, so an inverted print is the exact complement
//! of the normal print, which is *not* the same as dithering the negative
//! image (see the tests).
//!
//! ## The Bayer Matrix
//!
//! ```text
//!     0   1   2   3   4   5   6   7   (x mod 8)
//!   ┌───┬───┬───┬───┬───┬───┬───┬───┐
//! 0 │ 0 │32 │ 8 │40 │ 2 │34 │10 │42 │
//! 1 │48 │16 │56 │24 │50 │18 │58 │26 │
//! 2 │12 │44 │ 4 │36 │14 │46 │ 6 │38 │
//! 3 │60 │28 │52 │20 │62 │30 │54 │22 │
//! 4 │ 3 │35 │11 │43 │ 1 │33 │ 9 │41 │
//! 5 │51 │19 │59 │27 │49 │17 │57 │25 │
//! 6 │15 │47 │ 7 │39 │13 │45 │ 5 │37 │
//! 7 │63 │31 │55 │23 │61 │29 │53 │21 │
//!   └───┴───┴───┴───┴───┴───┴───┴───┘
//! (y mod 8)
//! ```
//!
//! ## Usage Example
//!
//! ```
//! use tinta::render::dither::{self, DitherConfig, DitheringAlgorithm};
//! use tinta::render::prepare::LuminanceField;
//!
//! let field = LuminanceField::filled(16, 16, 128.0);
//! let cfg = DitherConfig::new(DitheringAlgorithm::FloydSteinberg, 1.0, 128, false, false);
//! let mono = dither::dither(field, &cfg);
//! assert_eq!(mono.width(), 16);
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::mono::MonoImage;
use super::prepare::{LuminanceField, clamp_gamma};

/// Neutral threshold.
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Bayer 8x8 dithering matrix
///
/// Values range from 0-63. Low values activate first as the image darkens.
pub const BAYER8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Floyd-Steinberg kernel: `(dx, dy, weight / 16)`.
///
/// ```text
///          X   7
///      3   5   1
/// ```
pub const FLOYD_STEINBERG: [(isize, usize, f64); 4] = [(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];

/// Atkinson kernel: each neighbour receives 1/8 of the error.
///
/// ```text
///          X   1   1
///      1   1   1
///          1
/// ```
pub const ATKINSON: [(isize, usize); 6] = [(1, 0), (2, 0), (-1, 1), (0, 1), (1, 1), (0, 2)];

/// Dithering algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DitheringAlgorithm {
    /// Atkinson error diffusion (discards 2/8 of the error)
    #[default]
    Atkinson,
    /// Floyd-Steinberg error diffusion
    FloydSteinberg,
    /// Bayer 8x8 ordered dithering
    Ordered8x8,
    /// Flat threshold, no dithering
    None,
}

impl DitheringAlgorithm {
    /// All algorithms in settings index order.
    pub const ALL: [Self; 4] = [
        Self::Atkinson,
        Self::FloydSteinberg,
        Self::Ordered8x8,
        Self::None,
    ];

    /// Stable index used by the settings file.
    pub fn index(self) -> u8 {
        match self {
            Self::Atkinson => 0,
            Self::FloydSteinberg => 1,
            Self::Ordered8x8 => 2,
            Self::None => 3,
        }
    }

    /// Inverse of [`index`](Self::index); `None` for unknown indices.
    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Atkinson),
            1 => Some(Self::FloydSteinberg),
            2 => Some(Self::Ordered8x8),
            3 => Some(Self::None),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Atkinson => "Atkinson",
            Self::FloydSteinberg => "Floyd-Steinberg",
            Self::Ordered8x8 => "Ordered 8x8",
            Self::None => "None",
        }
    }
}

impl fmt::Display for DitheringAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DitheringAlgorithm {
    type Err = String;

    /// Parse a user-supplied name.
    ///
    /// Accepts `atkinson`, `floyd-steinberg` / `fs`, `ordered` / `ordered8x8` /
    /// `bayer`, `none` / `threshold` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "atkinson" => Ok(Self::Atkinson),
            "floyd-steinberg" | "floyd_steinberg" | "fs" => Ok(Self::FloydSteinberg),
            "ordered" | "ordered8x8" | "ordered-8x8" | "bayer" => Ok(Self::Ordered8x8),
            "none" | "threshold" => Ok(Self::None),
            other => Err(format!(
                "Unknown dither mode '{}'. Use atkinson, floyd-steinberg, ordered or none",
                other
            )),
        }
    }
}

/// Parameters for one processing run.
///
/// Build with [`DitherConfig::new`], which clamps gamma and threshold
/// silently; out-of-range values are never rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DitherConfig {
    pub mode: DitheringAlgorithm,
    /// Inverse-gamma applied by the preprocessor, in [0.10, 1.50]
    pub gamma: f32,
    pub threshold: u8,
    pub invert: bool,
    pub sharpen: bool,
}

impl DitherConfig {
    pub fn new(mode: DitheringAlgorithm, gamma: f32, threshold: i32, invert: bool, sharpen: bool) -> Self {
        Self {
            mode,
            gamma: clamp_gamma(gamma),
            threshold: threshold.clamp(0, 255) as u8,
            invert,
            sharpen,
        }
    }
}

impl Default for DitherConfig {
    fn default() -> Self {
        Self {
            mode: DitheringAlgorithm::default(),
            gamma: 1.0,
            threshold: DEFAULT_THRESHOLD,
            invert: false,
            sharpen: false,
        }
    }
}

/// Ordered threshold for a pixel position, in (0, 256).
///
/// ```text
/// threshold = (BAYER8[y mod 8][x mod 8] + 0.5) × 4
/// ```
#[inline]
pub fn ordered_threshold(x: usize, y: usize) -> f64 {
    (BAYER8[y & 7][x & 7] as f64 + 0.5) * 4.0
}

/// Dither a luminance field into a monochrome image.
///
/// The field is consumed: error-diffusion modes write ahead into it.
pub fn dither(mut field: LuminanceField, cfg: &DitherConfig) -> MonoImage {
    let (width, height) = (field.width(), field.height());
    debug!(width, height, mode = %cfg.mode, threshold = cfg.threshold, invert = cfg.invert, "Dithering");

    let threshold = cfg.threshold as f64;
    let mut out = MonoImage::new(width, height);

    match cfg.mode {
        DitheringAlgorithm::FloydSteinberg => {
            for y in 0..height {
                for x in 0..width {
                    let old = field.get(x, y);
                    let new = quantize(old, threshold);
                    out.set(x, y, (new == 0.0) ^ cfg.invert);
                    diffuse_floyd_steinberg(&mut field, x, y, old - new);
                }
            }
        }
        DitheringAlgorithm::Atkinson => {
            for y in 0..height {
                for x in 0..width {
                    let old = field.get(x, y);
                    let new = quantize(old, threshold);
                    out.set(x, y, (new == 0.0) ^ cfg.invert);
                    diffuse_atkinson(&mut field, x, y, (old - new) / 8.0);
                }
            }
        }
        DitheringAlgorithm::Ordered8x8 => {
            let offset = 128.0 - threshold;
            for y in 0..height {
                for x in 0..width {
                    let adjusted = (field.get(x, y) + offset).clamp(0.0, 255.0);
                    out.set(x, y, (adjusted < ordered_threshold(x, y)) ^ cfg.invert);
                }
            }
        }
        DitheringAlgorithm::None => {
            for y in 0..height {
                for x in 0..width {
                    out.set(x, y, (field.get(x, y) < threshold) ^ cfg.invert);
                }
            }
        }
    }

    debug!(black = out.count_black(), "Dithering complete");
    out
}

#[inline]
fn quantize(value: f64, threshold: f64) -> f64 {
    if value < threshold { 0.0 } else { 255.0 }
}

/// Spread `error` from (x, y) with the Floyd-Steinberg kernel.
///
/// Targets outside the field are skipped; the remaining weights are not
/// renormalized, so edge pixels lose the clipped share.
pub(crate) fn diffuse_floyd_steinberg(field: &mut LuminanceField, x: usize, y: usize, error: f64) {
    for (dx, dy, weight) in FLOYD_STEINBERG {
        if let Some((tx, ty)) = offset(field, x, y, dx, dy) {
            field.add(tx, ty, error * weight / 16.0);
        }
    }
}

/// Add `share` (already divided by 8) to each in-bounds Atkinson neighbour.
pub(crate) fn diffuse_atkinson(field: &mut LuminanceField, x: usize, y: usize, share: f64) {
    for (dx, dy) in ATKINSON {
        if let Some((tx, ty)) = offset(field, x, y, dx, dy) {
            field.add(tx, ty, share);
        }
    }
}

#[inline]
fn offset(field: &LuminanceField, x: usize, y: usize, dx: isize, dy: usize) -> Option<(usize, usize)> {
    let tx = x.checked_add_signed(dx)?;
    let ty = y + dy;
    (tx < field.width() && ty < field.height()).then_some((tx, ty))
}

// ============================================================================
// TESTS
// ============================================================================
