//! # ESC/POS Protocol Implementation
//!
//! This module provides low-level command builders for the ESC/POS subset
//! spoken by 58mm thermal printers.
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, feed)
//! - [`text`]: Justification (applies to raster images too)
//! - [`graphics`]: Raster bit image command (`GS v 0`)
//!
//! ## Usage Example
//!
//! ```
//! use tinta::protocol::{commands, graphics, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align_center());
//!
//! // One 8-dot wide, 2-row raster
//! data.extend(graphics::raster(1, 2, &[0xAA, 0x55]));
//!
//! data.extend(commands::feed_lines(2));
//! data.extend(commands::feed_lines(2));
//!
//! // Send `data` to printer via transport...
//! ```

pub mod commands;
pub mod graphics;
pub mod text;
