//! # Processing Pipeline
//!
//! One-call entry points chaining the three stages:
//!
//! ```text
//! DynamicImage ──prepare──► LuminanceField ──dither──► MonoImage ──encode──► CommandBuffer
//! ```
//!
//! Every call is pure and allocates fresh buffers. Callers that reprocess on
//! every slider change tag each request with a [`Generation`] from a shared
//! [`GenerationCounter`] and drop results that are no longer current.
//!
//! ```
//! use image::{DynamicImage, RgbImage, Rgb};
//! use tinta::pipeline::{self, GenerationCounter};
//! use tinta::render::dither::DitherConfig;
//!
//! let counter = GenerationCounter::new();
//! let photo = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 32, Rgb([200, 200, 200])));
//!
//! let generation = counter.issue();
//! let mono = pipeline::process(&photo, &DitherConfig::default(), 384);
//!
//! // A newer request arrived while this one was running
//! counter.issue();
//! assert!(!counter.is_current(generation));
//! # let _ = mono;
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use image::DynamicImage;
use tracing::debug;

use crate::encoder::{self, CommandBuffer, MAX_RASTER_HEIGHT};
use crate::error::TintaError;
use crate::printer::PrinterConfig;
use crate::render::dither::{self, DitherConfig};
use crate::render::mono::MonoImage;
use crate::render::prepare;

/// Preprocess and dither `source` for a printer `max_width` dots wide.
///
/// The result is at most `max_width` rounded up to a multiple of 8 wide.
pub fn process(source: &DynamicImage, cfg: &DitherConfig, max_width: u32) -> MonoImage {
    let start = Instant::now();
    let field = prepare::prepare(source, max_width, cfg.gamma, cfg.sharpen);
    let mono = dither::dither(field, cfg);
    debug!(
        width = mono.width(),
        height = mono.height(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Processed image"
    );
    mono
}

/// Process `source` and encode it as a complete print job for `printer`.
///
/// ## Errors
///
/// [`TintaError::Image`] if the processed image is taller than one raster
/// frame can hold ([`MAX_RASTER_HEIGHT`] rows).
pub fn print_job(
    source: &DynamicImage,
    cfg: &DitherConfig,
    printer: &PrinterConfig,
) -> Result<CommandBuffer, TintaError> {
    let mono = process(source, cfg, printer.width_dots as u32);
    if mono.height() > MAX_RASTER_HEIGHT {
        return Err(TintaError::Image(format!(
            "Image is {} rows tall after scaling; at most {} rows can be printed",
            mono.height(),
            MAX_RASTER_HEIGHT
        )));
    }
    Ok(encoder::encode_with(&mono, printer))
}

/// Token identifying one issued processing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic request counter for discard-by-generation.
///
/// `Sync`, so the thread issuing work and the worker completing it can share
/// one counter by reference or through an `Arc`.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier generation becomes stale.
    pub fn issue(&self) -> Generation {
        Generation(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Make every outstanding generation stale without issuing a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// Whether a finished result for `generation` may still be applied.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.current.load(Ordering::Acquire) == generation.0
    }
}

// ============================================================================
// TESTS
// ============================================================================
