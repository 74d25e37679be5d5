//! # Error Types
//!
//! This module defines error types used throughout the tinta library.
//!
//! The processing core (prepare, dither, encode) never fails on well-formed
//! input, so every variant here comes from a boundary: the printer device,
//! image files, or the settings file.

use thiserror::Error;

/// Main error type for tinta operations
#[derive(Debug, Error)]
pub enum TintaError {
    /// Opening or configuring the printer device failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Writing the command buffer to the printer failed.
    ///
    /// This is the single user-facing print failure. It is never retried.
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// Image decoding/encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Settings file could not be parsed or written
    #[error("Settings error: {0}")]
    Settings(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
