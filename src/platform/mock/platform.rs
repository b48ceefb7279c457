//! Mock platform implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError, TimerError},
    traits::{BusClockDivider, GpioInterface, GpioMode, Platform, SerialConfig},
    Result,
};

use super::{MockPin, MockSerial};

/// Highest pin number the mock board exposes
const PIN_COUNT: u8 = 32;

/// Mock platform
///
/// Hands out [`MockPin`] and [`MockSerial`] instances while enforcing the
/// same single-owner rules a hardware platform would: one claim per pin, one
/// serial port, one trace timer start.
#[derive(Debug)]
pub struct MockPlatform {
    claimed_pins: u32,
    serial_taken: bool,
    timer_running: bool,
    bus_divider: BusClockDivider,
}

impl MockPlatform {
    /// Whether the trace timer has been started
    pub fn trace_timer_running(&self) -> bool {
        self.timer_running
    }

    /// Currently configured bus clock divisor
    pub fn bus_divider(&self) -> BusClockDivider {
        self.bus_divider
    }
}

impl Platform for MockPlatform {
    type Serial = MockSerial;
    type Gpio = MockPin;

    fn init() -> Result<Self> {
        Ok(Self {
            claimed_pins: 0,
            serial_taken: false,
            timer_running: false,
            bus_divider: BusClockDivider::Quarter,
        })
    }

    fn system_clock_hz(&self) -> u32 {
        60_000_000
    }

    fn create_serial(&mut self, port: u8, config: SerialConfig) -> Result<Self::Serial> {
        if port != 0 {
            return Err(PlatformError::ResourceUnavailable);
        }
        if self.serial_taken {
            return Err(PlatformError::ResourceUnavailable);
        }
        self.serial_taken = true;
        Ok(MockSerial::new(config))
    }

    fn claim_pin(&mut self, pin: u8, mode: GpioMode) -> Result<Self::Gpio> {
        if pin >= PIN_COUNT {
            return Err(PlatformError::Gpio(GpioError::InvalidPin));
        }
        let mask = 1u32 << pin;
        if self.claimed_pins & mask != 0 {
            return Err(PlatformError::Gpio(GpioError::PinInUse));
        }
        self.claimed_pins |= mask;

        let mut gpio = match mode {
            GpioMode::OutputPushPull => MockPin::new_output(),
            _ => MockPin::new_input(),
        };
        gpio.set_mode(mode)?;
        Ok(gpio)
    }

    fn start_trace_timer(&mut self) -> Result<()> {
        if self.timer_running {
            return Err(PlatformError::Timer(TimerError::AlreadyRunning));
        }
        self.timer_running = true;
        Ok(())
    }

    fn set_bus_divider(&mut self, divider: BusClockDivider) -> Result<()> {
        self.bus_divider = divider;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::traits::GpioInterface;

    #[test]
    fn pins_are_single_owner() {
        let mut platform = MockPlatform::init().unwrap();
        let pin = platform.claim_pin(3, GpioMode::OutputPushPull).unwrap();
        assert_eq!(pin.mode(), GpioMode::OutputPushPull);

        assert_eq!(
            platform.claim_pin(3, GpioMode::Input).unwrap_err(),
            PlatformError::Gpio(GpioError::PinInUse)
        );
        assert!(platform.claim_pin(4, GpioMode::Input).is_ok());
    }

    #[test]
    fn invalid_pin_rejected() {
        let mut platform = MockPlatform::init().unwrap();
        assert_eq!(
            platform.claim_pin(PIN_COUNT, GpioMode::Input).unwrap_err(),
            PlatformError::Gpio(GpioError::InvalidPin)
        );
    }

    #[test]
    fn serial_is_single_owner() {
        let mut platform = MockPlatform::init().unwrap();
        assert!(platform.create_serial(0, SerialConfig::default()).is_ok());
        assert_eq!(
            platform
                .create_serial(0, SerialConfig::default())
                .unwrap_err(),
            PlatformError::ResourceUnavailable
        );
    }

    #[test]
    fn trace_timer_starts_once() {
        let mut platform = MockPlatform::init().unwrap();
        platform.start_trace_timer().unwrap();
        assert!(platform.trace_timer_running());
        assert_eq!(
            platform.start_trace_timer(),
            Err(PlatformError::Timer(TimerError::AlreadyRunning))
        );
    }
}
