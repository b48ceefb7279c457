//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates the peripheral
//! interfaces and provides one-time hardware bring-up: serial creation, pin
//! claiming, the free-running trace timer, and the peripheral bus clock.

use super::{GpioMode, SerialConfig};
use crate::platform::Result;

/// Peripheral bus clock divisor
///
/// Controls the ratio between the CPU clock and the peripheral bus clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusClockDivider {
    /// Peripheral bus runs at the full CPU clock rate
    Full,
    /// Peripheral bus runs at half the CPU clock rate
    Half,
    /// Peripheral bus runs at a quarter of the CPU clock rate
    Quarter,
}

/// Root platform trait
///
/// Platform implementations provide concrete types for each peripheral
/// interface via associated types, enabling compile-time dispatch.
///
/// # Example
///
/// ```ignore
/// pub struct Lpc2129Platform { /* ... */ }
///
/// impl Platform for Lpc2129Platform {
///     type Serial = Lpc2129Uart;
///     type Gpio = Lpc2129Pin;
///
///     fn init() -> Result<Self> {
///         // Configure clocks and power up peripherals
///     }
///
///     // ... peripheral constructors
/// }
/// ```
pub trait Platform: Sized {
    /// Serial peripheral type
    type Serial: super::SerialInterface;

    /// GPIO peripheral type
    type Gpio: super::GpioInterface;

    /// Initialize the platform
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InitializationFailed` if initialization fails.
    fn init() -> Result<Self>;

    /// Get system clock frequency in Hz
    fn system_clock_hz(&self) -> u32;

    /// Create the serial transport instance
    ///
    /// # Arguments
    ///
    /// * `port` - Platform-specific port identifier (0 for the first UART)
    /// * `config` - Serial configuration
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::ResourceUnavailable` if the port is already in
    /// use or the identifier is invalid.
    fn create_serial(&mut self, port: u8, config: SerialConfig) -> Result<Self::Serial>;

    /// Claim a GPIO pin in the given mode
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Gpio(GpioError::InvalidPin)` for an unknown
    /// pin number and `PlatformError::Gpio(GpioError::PinInUse)` if the pin
    /// was already claimed.
    fn claim_pin(&mut self, pin: u8, mode: GpioMode) -> Result<Self::Gpio>;

    /// Start the free-running trace timer
    ///
    /// The timer provides the timestamp reference an external analyzer
    /// correlates trace pin edges against. It is started once during
    /// bring-up and never stopped.
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Timer(TimerError::AlreadyRunning)` if called
    /// twice.
    fn start_trace_timer(&mut self) -> Result<()>;

    /// Set the peripheral bus clock divisor
    fn set_bus_divider(&mut self, divider: BusClockDivider) -> Result<()>;
}
