//! # ESC/POS Raster Graphics
//!
//! This module implements the raster bit image command used to print a
//! dithered picture on a narrow thermal printer.
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (horizontal, 384 dots max)
//!   │
//!   │   ████████  ← Each dot is ~0.125mm (203 DPI)
//!   │   ████████
//!   ▼
//!   Y (vertical, paper feed direction)
//! ```
//!
//! ## Bit Packing
//!
//! Graphics data is packed as bytes where each bit represents one dot:
//! - Bit 7 (MSB) = leftmost dot
//! - Bit 0 (LSB) = rightmost dot
//! - 1 = black (print), 0 = white (no print)
//!
//! ```text
//! Byte value 0xF0 = 11110000 = ████░░░░
//! Byte value 0x0F = 00001111 = ░░░░████
//! Byte value 0xAA = 10101010 = █░█░█░█░
//! ```

use super::commands::{GS, u16_le};

/// Normal density raster mode (`m = 0` in `GS v 0`)
pub const RASTER_MODE_NORMAL: u8 = 0;

/// Length of the `GS v 0` header preceding the image data
pub const RASTER_HEADER_LEN: usize = 8;

/// # Print Raster Bit Image (GS v 0 m xL xH yL yH d1...dk)
///
/// Prints a raster image of arbitrary height in a single frame.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | GS v 0 m xL xH yL yH d1...dk |
/// | Hex     | 1D 76 30 m xL xH yL yH d1...dk |
/// | Decimal | 29 118 48 m xL xH yL yH d1...dk |
///
/// ## Parameters
///
/// - `m`: Mode (0 = normal density)
/// - `xL, xH`: Width in **bytes**, little-endian
/// - `yL, yH`: Height in dots, little-endian
/// - `d1...dk`: Image data, k = width_bytes × height bytes, row-major
///
/// ## Single Frame
///
/// The whole image goes out as one command. Framing every scanline with its
/// own header adds eight bytes of overhead per row and buys nothing once the
/// image fits in one buffer.
///
/// ## Example
///
/// ```
/// use tinta::protocol::graphics;
///
/// // 384 dots wide (48 bytes), 100 rows tall
/// let data = vec![0xAA; 48 * 100];
/// let cmd = graphics::raster(48, 100, &data);
///
/// assert_eq!(&cmd[0..4], &[0x1D, 0x76, 0x30, 0x00]);
/// assert_eq!(&cmd[4..8], &[48, 0, 100, 0]);
/// assert_eq!(cmd.len(), 8 + 48 * 100);
/// ```
pub fn raster(width_bytes: u16, height: u16, data: &[u8]) -> Vec<u8> {
    let expected_len = width_bytes as usize * height as usize;

    debug_assert!(
        data.len() == expected_len,
        "Raster data length mismatch. Expected {} ({} bytes × {} rows), got {}",
        expected_len,
        width_bytes,
        height,
        data.len()
    );

    let [xl, xh] = u16_le(width_bytes);
    let [yl, yh] = u16_le(height);

    let mut cmd = Vec::with_capacity(RASTER_HEADER_LEN + data.len());
    cmd.push(GS);
    cmd.push(b'v');
    cmd.push(b'0');
    cmd.push(RASTER_MODE_NORMAL);
    cmd.push(xl);
    cmd.push(xh);
    cmd.push(yl);
    cmd.push(yh);
    cmd.extend_from_slice(data);
    cmd
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_header() {
        let data = vec![0xFF; 48 * 100];
        let cmd = raster(48, 100, &data);

        assert_eq!(cmd[0], 0x1D); // GS
        assert_eq!(cmd[1], 0x76); // 'v'
        assert_eq!(cmd[2], 0x30); // '0'
        assert_eq!(cmd[3], 0); // m = normal
        assert_eq!(cmd[4], 48); // xL
        assert_eq!(cmd[5], 0); // xH
        assert_eq!(cmd[6], 100); // yL
        assert_eq!(cmd[7], 0); // yH
    }

    #[test]
    fn test_raster_large_height() {
        // Height > 255 exercises the high byte
        let height: u16 = 500;
        let data = vec![0x00; 48 * height as usize];
        let cmd = raster(48, height, &data);

        // 500 = 0x01F4 -> [0xF4, 0x01]
        assert_eq!(cmd[6], 0xF4);
        assert_eq!(cmd[7], 0x01);
    }

    #[test]
    fn test_raster_total_length() {
        let data = vec![0x00; 3 * 7];
        let cmd = raster(3, 7, &data);
        assert_eq!(cmd.len(), RASTER_HEADER_LEN + 21);
    }

    #[test]
    fn test_raster_preserves_data() {
        let data: Vec<u8> = (0..48 * 50).map(|i| (i % 256) as u8).collect();
        let cmd = raster(48, 50, &data);
        assert_eq!(&cmd[RASTER_HEADER_LEN..], &data[..]);
    }
}
