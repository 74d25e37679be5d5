//! # Printer Configuration
//!
//! This module defines hardware specifications for supported thermal printers.
//!
//! ## Supported Printers
//!
//! | Model | Width (dots) | Resolution | Paper |
//! |-------|--------------|------------|-------|
//! | Generic 58mm (Phomemo-style) | 384 | 203 DPI | 58mm |
//!
//! ## Usage
//!
//! ```
//! use tinta::printer::PrinterConfig;
//!
//! let config = PrinterConfig::MM58;
//! println!("Print width: {} dots", config.width_dots);
//! ```

/// # Printer Configuration
///
/// Defines the hardware characteristics of a thermal printer.
///
/// - **width_dots**: Maximum printable width in dots; wider images are
///   downscaled to it
/// - **feed_lines**: Lines fed by each trailing `ESC d n` command
/// - **feed_commands**: How many feed commands end a job
#[derive(Debug, Clone, Copy)]
pub struct PrinterConfig {
    /// Printer model name
    pub name: &'static str,

    /// Maximum print width in dots (pixels)
    pub width_dots: u16,

    /// Lines fed per trailing feed command
    pub feed_lines: u8,

    /// Number of trailing feed commands (issued separately, not summed)
    pub feed_commands: u8,
}

impl PrinterConfig {
    /// # Generic 58mm Thermal Printer
    ///
    /// Narrow-format receipt/label printer of the kind sold as Phomemo,
    /// "cat printer" ESC/POS clones, etc.
    ///
    /// ## Specifications
    ///
    /// | Property | Value |
    /// |----------|-------|
    /// | Paper width | 58mm |
    /// | Print width | 48mm (384 dots) |
    /// | Resolution | 203 DPI |
    /// | Interface | Bluetooth SPP (RFCOMM) |
    /// | Cutter | Tear bar |
    ///
    /// ## Print Area
    ///
    /// ```text
    /// ├── 5mm ──┼────── 48mm printable ──────┼── 5mm ──┤
    /// │ margin  │         384 dots           │ margin  │
    /// ```
    pub const MM58: Self = Self {
        name: "Generic 58mm",
        width_dots: 384,
        feed_lines: 2,
        feed_commands: 2,
    };

    /// Build a profile for a printer with a different dot width.
    ///
    /// The width is kept as given; the pipeline rounds image widths up to a
    /// multiple of 8 on its own.
    pub fn with_width(width_dots: u16) -> Self {
        Self {
            name: "Custom",
            width_dots,
            ..Self::MM58
        }
    }
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self::MM58
    }
}

// ============================================================================
// TESTS
// ============================================================================
