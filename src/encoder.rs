//! # Raster Encoder
//!
//! Packs a [`MonoImage`] into MSB-first rows and frames it as a complete
//! print job:
//!
//! ```text
//! 1B 40                       reset
//! 1B 61 01                    align centre
//! 1D 76 30 00 xL xH yL yH     raster image, width in bytes × height in dots
//! <bytes_per_line × height>   image data, row-major
//! 1B 64 02                    feed 2 lines
//! 1B 64 02                    feed 2 lines
//! ```
//!
//! The whole image is one raster frame; there is no banding.

use tracing::debug;

use crate::printer::PrinterConfig;
use crate::protocol::{commands, graphics, text};
use crate::render::mono::{MonoImage, pack_row, unpack_row};

/// Tallest image a single `GS v 0` frame can describe.
pub const MAX_RASTER_HEIGHT: usize = u16::MAX as usize;

/// Packed 1-bit image data, ready for a `GS v 0` frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    pub bytes_per_line: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RasterBuffer {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// One packed row.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.bytes_per_line;
        &self.data[start..start + self.bytes_per_line]
    }
}

/// The final byte sequence handed to a transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer(Vec<u8>);

impl CommandBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Pack every row of `img`, 8 pixels per byte, MSB first, 1 = black.
pub fn pack(img: &MonoImage) -> RasterBuffer {
    let bytes_per_line = img.width().div_ceil(8);
    let mut data = Vec::with_capacity(bytes_per_line * img.height());
    for y in 0..img.height() {
        data.extend(pack_row(img.row(y)));
    }

    RasterBuffer {
        bytes_per_line,
        height: img.height(),
        data,
    }
}

/// Inverse of [`pack`]: recover `width` pixels per row.
pub fn unpack(raster: &RasterBuffer, width: usize) -> MonoImage {
    debug_assert!(width <= raster.bytes_per_line * 8, "width exceeds packed row");

    let mut pixels = Vec::with_capacity(width * raster.height);
    for y in 0..raster.height {
        pixels.extend(unpack_row(raster.row(y), width));
    }
    MonoImage::from_pixels(width, raster.height, pixels)
}

/// Encode `img` as a complete job for the default 58mm printer.
pub fn encode(img: &MonoImage) -> CommandBuffer {
    encode_with(img, &PrinterConfig::MM58)
}

/// Encode `img` as a complete job, taking the trailing feed from `config`.
///
/// The image width must be a multiple of 8 and its height at most
/// [`MAX_RASTER_HEIGHT`]; [`crate::pipeline::print_job`] checks both.
pub fn encode_with(img: &MonoImage, config: &PrinterConfig) -> CommandBuffer {
    debug_assert!(img.width() % 8 == 0, "width {} is not a multiple of 8", img.width());
    debug_assert!(img.height() <= MAX_RASTER_HEIGHT, "height {} exceeds u16", img.height());
    debug_assert!(img.width() / 8 <= u16::MAX as usize, "width {} exceeds u16 bytes", img.width());

    let raster = pack(img);

    let mut out = Vec::with_capacity(raster.len() + 16);
    out.extend(commands::init());
    out.extend(text::align_center());
    out.extend(graphics::raster(
        raster.bytes_per_line as u16,
        raster.height as u16,
        &raster.data,
    ));
    for _ in 0..config.feed_commands {
        out.extend(commands::feed_lines(config.feed_lines));
    }

    debug!(
        width = img.width(),
        height = img.height(),
        bytes = out.len(),
        "Encoded raster job"
    );
    CommandBuffer(out)
}

// ============================================================================
// TESTS
// ============================================================================
