//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod gpio;
pub mod platform;
pub mod serial;

// Re-export trait interfaces
pub use gpio::{GpioInterface, GpioMode};
pub use platform::{BusClockDivider, Platform};
pub use serial::{SerialConfig, SerialInterface};
