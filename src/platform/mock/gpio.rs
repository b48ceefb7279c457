//! Mock GPIO implementation for testing

use crate::platform::{
    error::{GpioError, PlatformError},
    traits::{GpioInterface, GpioMode},
    Result,
};
use core::cell::Cell;

/// Mock GPIO implementation
///
/// Tracks pin level and mode for test verification. Level and mode live in
/// `Cell`s so a test can drive an input pin through a shared reference while
/// a task samples it.
#[derive(Debug)]
pub struct MockPin {
    level: Cell<bool>,
    mode: Cell<GpioMode>,
}

impl MockPin {
    /// Create a new mock pin in push-pull output mode, driven low
    pub fn new_output() -> Self {
        Self {
            level: Cell::new(false),
            mode: Cell::new(GpioMode::OutputPushPull),
        }
    }

    /// Create a new mock pin in input mode, reading low
    pub fn new_input() -> Self {
        Self {
            level: Cell::new(false),
            mode: Cell::new(GpioMode::Input),
        }
    }

    /// Drive the externally applied level of an input pin
    pub fn set_level(&self, high: bool) {
        self.level.set(high);
    }

    /// Current pin level, regardless of mode
    pub fn is_high(&self) -> bool {
        self.level.get()
    }
}

impl GpioInterface for MockPin {
    fn set_high(&mut self) -> Result<()> {
        match self.mode.get() {
            GpioMode::OutputPushPull => {
                self.level.set(true);
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn set_low(&mut self) -> Result<()> {
        match self.mode.get() {
            GpioMode::OutputPushPull => {
                self.level.set(false);
                Ok(())
            }
            _ => Err(PlatformError::Gpio(GpioError::InvalidMode)),
        }
    }

    fn read(&self) -> bool {
        self.level.get()
    }

    fn set_mode(&mut self, mode: GpioMode) -> Result<()> {
        self.mode.set(mode);
        Ok(())
    }

    fn mode(&self) -> GpioMode {
        self.mode.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_pin_drives_level() {
        let mut pin = MockPin::new_output();
        assert!(!pin.read());

        pin.set_high().unwrap();
        assert!(pin.read());

        pin.set_low().unwrap();
        assert!(!pin.read());
    }

    #[test]
    fn input_pin_rejects_writes() {
        let mut pin = MockPin::new_input();
        assert!(pin.set_high().is_err());
        assert!(pin.set_low().is_err());
    }

    #[test]
    fn input_pin_reads_external_level() {
        let pin = MockPin::new_input();
        assert!(!pin.read());

        pin.set_level(true);
        assert!(pin.read());

        pin.set_level(false);
        assert!(!pin.read());
    }

    #[test]
    fn mode_change() {
        let mut pin = MockPin::new_output();
        assert_eq!(pin.mode(), GpioMode::OutputPushPull);

        pin.set_mode(GpioMode::InputPullDown).unwrap();
        assert_eq!(pin.mode(), GpioMode::InputPullDown);
    }
}
