//! # Bluetooth RFCOMM Transport
//!
//! Talks to a paired 58mm printer through its Serial Port Profile device
//! node. Pairing and binding happen outside this crate:
//!
//! ```bash
//! $ bluetoothctl pair 66:32:XX:XX:XX:XX
//! $ sudo rfcomm bind 0 66:32:XX:XX:XX:XX
//! # creates /dev/rfcomm0
//! ```
//!
//! Any character device that accepts raw bytes (a USB serial adapter, a
//! `/dev/usb/lp*` node) works the same way.
//!
//! ## TTY Configuration
//!
//! The device is switched to raw mode so raster bytes pass through untouched:
//! no CR/LF translation, 8-bit characters, no echo, no canonical buffering,
//! and no XON/XOFF flow control (0x11 and 0x13 show up in image data).
//!
//! ## Chunked Writes
//!
//! Jobs are written in 4096-byte chunks with a 2ms pause between them so the
//! printer's small receive buffer keeps up.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::io::AsRawFd;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::{debug, info};

use super::Transport;
use crate::error::TintaError;

/// Default RFCOMM device path
pub const DEFAULT_DEVICE: &str = "/dev/rfcomm0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Bluetooth Printer Transport
///
/// ## Example
///
/// ```no_run
/// use tinta::transport::{self, BluetoothTransport};
/// use tinta::encoder;
/// use tinta::render::mono::MonoImage;
///
/// let mut printer = BluetoothTransport::open("/dev/rfcomm0")?;
/// let job = encoder::encode(&MonoImage::new(384, 16));
/// transport::send(&mut printer, &job)?;
///
/// # Ok::<(), tinta::error::TintaError>(())
/// ```
pub struct BluetoothTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl BluetoothTransport {
    /// Open the device and configure it for raw binary I/O.
    ///
    /// ## Errors
    ///
    /// [`TintaError::Transport`] if the node is missing, access is denied
    /// (try the `dialout` group), or TTY configuration fails.
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, TintaError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            TintaError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        configure_tty_raw(file.as_raw_fd())?;
        info!(device = %path.display(), "Opened printer device");

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Set the chunk size for large writes. Zero is treated as one byte.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Transport for BluetoothTransport {
    fn write(&mut self, data: &[u8]) -> Result<(), TintaError> {
        let chunks = data.len().div_ceil(self.chunk_size);
        for (i, chunk) in data.chunks(self.chunk_size).enumerate() {
            self.file
                .write_all(chunk)
                .map_err(|e| TintaError::SendFailed(format!("Write failed: {}", e)))?;

            if i + 1 < chunks && !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }

        self.file
            .flush()
            .map_err(|e| TintaError::SendFailed(format!("Flush failed: {}", e)))?;

        debug!(bytes = data.len(), chunks, "Wrote to printer");
        Ok(())
    }
}

/// Configure a file descriptor for raw TTY mode.
///
/// Disables input processing (including IXON/IXOFF/IXANY), output
/// post-processing, echo, canonical mode and signals, then selects 8-bit
/// characters without parity.
#[cfg(unix)]
fn configure_tty_raw(fd: i32) -> Result<(), TintaError> {
    use std::mem::MaybeUninit;

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        let err = io::Error::last_os_error();
        // Plain files and printer class devices are not TTYs; write to them as-is.
        if err.raw_os_error() == Some(libc::ENOTTY) {
            debug!("Device is not a TTY, skipping raw mode");
            return Ok(());
        }
        return Err(TintaError::Transport(format!("tcgetattr failed: {}", err)));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);

    termios.c_oflag &= !libc::OPOST;

    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);

    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(TintaError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_tty_raw(_fd: i32) -> Result<(), TintaError> {
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
