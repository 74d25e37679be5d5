//! # Tinta - Thermal Printer Image Pipeline
//!
//! Tinta prepares photos for 58mm (384-dot) monochrome thermal printers and
//! encodes them as ESC/POS raster jobs. It provides:
//!
//! - **Preprocessing**: downscale, pad to whole bytes, luminance, gamma, sharpening
//! - **Dithering**: Atkinson, Floyd-Steinberg, Bayer 8x8 and flat threshold
//! - **Encoding**: MSB-first bit packing framed in `GS v 0`
//! - **Transport**: Bluetooth RFCOMM / serial device and in-memory capture
//!
//! ## Quick Start
//!
//! ```no_run
//! use tinta::{
//!     pipeline,
//!     printer::PrinterConfig,
//!     render::dither::{DitherConfig, DitheringAlgorithm},
//!     transport::{self, BluetoothTransport},
//! };
//!
//! let photo = image::open("cat.jpg").map_err(|e| tinta::TintaError::Image(e.to_string()))?;
//! let cfg = DitherConfig::new(DitheringAlgorithm::Atkinson, 0.8, 128, false, true);
//!
//! let job = pipeline::print_job(&photo, &cfg, &PrinterConfig::MM58)?;
//!
//! let mut printer = BluetoothTransport::open("/dev/rfcomm0")?;
//! transport::send(&mut printer, &job)?;
//!
//! # Ok::<(), tinta::error::TintaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`render`] | Preprocessing, dithering, 1-bit images, previews |
//! | [`encoder`] | Bit packing and job framing |
//! | [`protocol`] | ESC/POS command builders |
//! | [`pipeline`] | One-call processing and generation tracking |
//! | [`transport`] | Communication backends |
//! | [`printer`] | Printer configurations |
//! | [`settings`] | Persisted print settings |
//! | [`session`] | Story pages and generation chaining ids |
//! | [`error`] | Error types |

pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod printer;
pub mod protocol;
pub mod render;
pub mod session;
pub mod settings;
pub mod transport;

// Re-exports for convenience
pub use encoder::CommandBuffer;
pub use error::TintaError;
pub use printer::PrinterConfig;
pub use render::dither::{DitherConfig, DitheringAlgorithm};
pub use render::mono::MonoImage;
pub use transport::{BluetoothTransport, Transport};
