//! Mock serial transport for testing

use crate::platform::{
    error::{PlatformError, SerialError},
    traits::{SerialConfig, SerialInterface},
    Result,
};
use core::cell::{Cell, RefCell};
use heapless::Vec;

/// Capacity of the mock transmit capture buffer
const TX_CAPACITY: usize = 1024;

/// Mock serial transport
///
/// Captures accepted messages for test verification and can be scripted to
/// reject a number of upcoming send attempts, which is how tests exercise the
/// consumer's retry-until-accepted behavior.
///
/// # Example
///
/// ```ignore
/// use sched_trace::platform::mock::MockSerial;
/// use sched_trace::platform::traits::SerialInterface;
///
/// let mut serial = MockSerial::new(Default::default());
/// serial.reject_next(2);
///
/// assert_eq!(serial.try_send(b"hello").unwrap(), false);
/// assert_eq!(serial.try_send(b"hello").unwrap(), false);
/// assert_eq!(serial.try_send(b"hello").unwrap(), true);
/// assert_eq!(serial.attempts(), 3);
/// assert_eq!(serial.transmitted(), b"hello");
/// ```
#[derive(Debug)]
pub struct MockSerial {
    config: SerialConfig,
    tx: RefCell<Vec<u8, TX_CAPACITY>>,
    reject_remaining: Cell<u32>,
    fault_remaining: Cell<u32>,
    attempts: Cell<u32>,
}

impl MockSerial {
    /// Create a new mock serial port
    pub fn new(config: SerialConfig) -> Self {
        Self {
            config,
            tx: RefCell::new(Vec::new()),
            reject_remaining: Cell::new(0),
            fault_remaining: Cell::new(0),
            attempts: Cell::new(0),
        }
    }

    /// Reject the next `n` send attempts with a full-buffer indication
    pub fn reject_next(&mut self, n: u32) {
        self.reject_remaining.set(n);
    }

    /// Fail the next `n` send attempts with a hard transport fault
    pub fn fault_next(&mut self, n: u32) {
        self.fault_remaining.set(n);
    }

    /// Total number of send attempts observed, accepted or not
    pub fn attempts(&self) -> u32 {
        self.attempts.get()
    }

    /// All bytes accepted so far, in order
    pub fn transmitted(&self) -> Vec<u8, TX_CAPACITY> {
        self.tx.borrow().clone()
    }

    /// Drop the capture buffer contents
    pub fn clear(&mut self) {
        self.tx.borrow_mut().clear();
    }

    /// Current baud rate
    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl SerialInterface for MockSerial {
    fn try_send(&mut self, data: &[u8]) -> Result<bool> {
        self.attempts.set(self.attempts.get() + 1);

        if self.fault_remaining.get() > 0 {
            self.fault_remaining.set(self.fault_remaining.get() - 1);
            return Err(PlatformError::Serial(SerialError::WriteFailed));
        }
        if self.reject_remaining.get() > 0 {
            self.reject_remaining.set(self.reject_remaining.get() - 1);
            return Ok(false);
        }

        self.tx
            .borrow_mut()
            .extend_from_slice(data)
            .map_err(|_| PlatformError::Serial(SerialError::Overrun))?;
        Ok(true)
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<()> {
        if baud == 0 {
            return Err(PlatformError::Serial(SerialError::InvalidBaudRate));
        }
        self.config.baud_rate = baud;
        Ok(())
    }
}
