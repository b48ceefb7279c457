//! Mock platform implementations for testing

pub mod gpio;
pub mod platform;
pub mod serial;

pub use gpio::MockPin;
pub use platform::MockPlatform;
pub use serial::MockSerial;
