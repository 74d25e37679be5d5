//! # Printer Transport Layer
//!
//! This module provides communication backends for sending a finished
//! [`CommandBuffer`] to a printer.
//!
//! ## Available Transports
//!
//! - [`bluetooth`]: Bluetooth RFCOMM / serial device node (Linux)
//! - [`memory`]: In-memory capture for tests and dry runs
//!
//! ## Failure Policy
//!
//! [`send`] writes the buffer exactly once. Whatever goes wrong underneath
//! (closed socket, short write, flush failure) surfaces as a single
//! [`TintaError::SendFailed`]. There is no retry.

pub mod bluetooth;
pub mod memory;

use tracing::{info, warn};

use crate::encoder::CommandBuffer;
use crate::error::TintaError;

pub use bluetooth::BluetoothTransport;
pub use memory::MemoryTransport;

/// A byte sink connected to a printer.
pub trait Transport {
    /// Write all of `data`, flushing before returning.
    fn write(&mut self, data: &[u8]) -> Result<(), TintaError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, data: &[u8]) -> Result<(), TintaError> {
        (**self).write(data)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn write(&mut self, data: &[u8]) -> Result<(), TintaError> {
        (**self).write(data)
    }
}

/// Send a print job.
///
/// Any failure is reported as [`TintaError::SendFailed`] carrying the cause.
pub fn send<T: Transport + ?Sized>(transport: &mut T, buffer: &CommandBuffer) -> Result<(), TintaError> {
    info!(bytes = buffer.len(), "Sending print job");

    transport.write(buffer.as_bytes()).map_err(|e| {
        warn!(error = %e, "Print job failed");
        match e {
            TintaError::SendFailed(msg) => TintaError::SendFailed(msg),
            other => TintaError::SendFailed(other.to_string()),
        }
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder;
    use crate::render::mono::MonoImage;

    fn job() -> CommandBuffer {
        encoder::encode(&MonoImage::new(8, 1))
    }

    #[test]
    fn test_send_writes_buffer_once() {
        let mut transport = MemoryTransport::new();
        let buffer = job();
        send(&mut transport, &buffer).unwrap();
        assert_eq!(transport.written(), buffer.as_bytes());
        assert_eq!(transport.write_count(), 1);
    }

    #[test]
    fn test_send_failure_is_send_failed() {
        let mut transport = MemoryTransport::failing();
        let err = send(&mut transport, &job()).unwrap_err();
        assert!(matches!(err, TintaError::SendFailed(_)));
        assert_eq!(transport.write_count(), 1, "no retry");
        assert!(transport.written().is_empty());
    }

    #[test]
    fn test_send_wraps_other_errors() {
        struct Broken;
        impl Transport for Broken {
            fn write(&mut self, _data: &[u8]) -> Result<(), TintaError> {
                Err(TintaError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "socket closed",
                )))
            }
        }

        let err = send(&mut Broken, &job()).unwrap_err();
        match err {
            TintaError::SendFailed(msg) => assert!(msg.contains("socket closed")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_send_through_boxed_transport() {
        let mut boxed: Box<dyn Transport> = Box::new(MemoryTransport::new());
        assert!(send(&mut boxed, &job()).is_ok());
    }
}
