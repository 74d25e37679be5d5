//! In-memory transport.
//!
//! Captures everything written to it. A failing instance rejects every
//! write, which is how the send-failure path is exercised without hardware.

use std::fs;
use std::path::Path;

use crate::error::TintaError;

use super::Transport;

/// Transport that appends writes to a buffer.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    buffer: Vec<u8>,
    writes: usize,
    fail: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transport whose every write fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Bytes captured so far.
    pub fn written(&self) -> &[u8] {
        &self.buffer
    }

    /// Number of write attempts, successful or not.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }

    /// Dump the captured bytes to a file.
    pub fn save(&self, path: &Path) -> Result<(), TintaError> {
        fs::write(path, &self.buffer)?;
        Ok(())
    }
}

impl Transport for MemoryTransport {
    fn write(&mut self, data: &[u8]) -> Result<(), TintaError> {
        self.writes += 1;
        if self.fail {
            return Err(TintaError::SendFailed("transport is configured to fail".to_string()));
        }
        self.buffer.extend_from_slice(data);
        Ok(())
    }
}
