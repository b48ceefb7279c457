//! Serial transport interface trait
//!
//! The task set talks to exactly one serial port, and only ever through a
//! non-blocking single-attempt send: the transport either accepts the whole
//! message or reports that it is busy. There is no read side.

use crate::platform::Result;

/// Serial port configuration
#[derive(Debug, Clone, Copy)]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baud_rate: 115_200 }
    }
}

/// Serial transport interface trait
///
/// Platform implementations must provide this interface for the outgoing
/// message stream.
pub trait SerialInterface {
    /// Attempt to hand one message to the transport, without blocking.
    ///
    /// Returns `Ok(true)` if the transport accepted the whole message and
    /// `Ok(false)` if it cannot take it right now (e.g. the hardware FIFO is
    /// full). A rejected message is not partially transmitted; the caller may
    /// simply try again.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Serial` on a hard transport fault. A full
    /// buffer is not a fault.
    fn try_send(&mut self, data: &[u8]) -> Result<bool>;

    /// Change the configured baud rate
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Serial(SerialError::InvalidBaudRate)` if the
    /// rate is not supported.
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;
}
