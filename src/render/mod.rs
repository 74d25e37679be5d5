//! # Rendering Module
//!
//! Turns a decoded picture into something a 1-bit thermal head can print.
//!
//! ## Modules
//!
//! - [`prepare`]: Downscale, pad, luminance, gamma and sharpening
//! - [`dither`]: Floyd-Steinberg, Atkinson, Bayer 8x8 and plain threshold
//! - [`mono`]: The 1-bit [`mono::MonoImage`] and MSB-first row packing
//! - [`preview`]: PNG previews with nearest-neighbour upscaling
//!
//! ## Usage Example
//!
//! ```
//! use image::{DynamicImage, RgbImage};
//! use tinta::render::{dither, prepare};
//! use tinta::render::dither::{DitherConfig, DitheringAlgorithm};
//!
//! let photo = DynamicImage::ImageRgb8(RgbImage::new(500, 250));
//!
//! // 500 wide → 384 wide, 192 tall
//! let field = prepare::prepare(&photo, 384, 1.0, false);
//! let cfg = DitherConfig::new(DitheringAlgorithm::Atkinson, 1.0, 128, false, false);
//! let mono = dither::dither(field, &cfg);
//!
//! assert_eq!((mono.width(), mono.height()), (384, 192));
//! ```

pub mod dither;
pub mod mono;
pub mod prepare;
pub mod preview;
