//! # Monochrome Images
//!
//! [`MonoImage`] is the 1-bit output of the ditherer: one `bool` per pixel,
//! `true` meaning a printed (black) dot. It doubles as the print preview and
//! as the input to the raster encoder.
//!
//! ## Bit Packing
//!
//! Rows are packed 8 pixels per byte, most significant bit first:
//!
//! ```text
//! pixels: █ ░ █ ░ █ ░ █ ░
//! bits:   1 0 1 0 1 0 1 0  = 0xAA
//! ```
//!
//! ```
//! use tinta::render::mono::{pack_row, unpack_row};
//!
//! let row = vec![true, true, false, false, true, false, true, false];
//! let packed = pack_row(&row);
//! assert_eq!(packed, vec![0b11001010]); // 0xCA
//! assert_eq!(unpack_row(&packed, 8), row);
//! ```

/// A 1-bit image, row-major, `true` = black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoImage {
    width: usize,
    height: usize,
    pixels: Vec<bool>,
}

impl MonoImage {
    /// Create an all-white image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width * height],
        }
    }

    /// Wrap an existing row-major pixel vector.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<bool>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width * height,
            "pixel count does not match {}x{}",
            width,
            height
        );
        Self {
            width,
            height,
            pixels,
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

    /// Whether the pixel at (x, y) is black.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, black: bool) {
        self.pixels[y * self.width + x] = black;
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }

    pub fn pixels(&self) -> &[bool] {
        &self.pixels
    }

    /// Number of black pixels.
    pub fn count_black(&self) -> usize {
        self.pixels.iter().filter(|&&p| p).count()
    }

    /// Bitwise complement of the image.
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|&p| !p).collect(),
        }
    }
}

/// Pack a row of boolean pixel values into bytes.
///
/// - Bit 7 (MSB) = leftmost pixel
/// - 1 = black (print dot), 0 = white (no dot)
///
/// If the row length is not a multiple of 8, the last byte is padded with
/// zeros (white) on the right.
///
/// ```
/// use tinta::render::mono::pack_row;
///
/// // 12 pixels pack into 2 bytes (4 bits padding)
/// let row = vec![true; 12];
/// assert_eq!(pack_row(&row), vec![0xFF, 0xF0]);
/// ```
pub fn pack_row(pixels: &[bool]) -> Vec<u8> {
    let num_bytes = pixels.len().div_ceil(8);
    let mut bytes = vec![0u8; num_bytes];

    for (i, &pixel) in pixels.iter().enumerate() {
        if pixel {
            let byte_idx = i / 8;
            let bit_idx = 7 - (i % 8); // MSB first
            bytes[byte_idx] |= 1 << bit_idx;
        }
    }

    bytes
}

/// Unpack `width` pixels from MSB-first bytes. Padding bits are ignored.
pub fn unpack_row(bytes: &[u8], width: usize) -> Vec<bool> {
    (0..width)
        .map(|x| (bytes[x / 8] >> (7 - (x % 8))) & 1 == 1)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
