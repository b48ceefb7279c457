//! Platform abstraction layer
//!
//! This module provides hardware abstraction for the trace pins, the button
//! inputs, and the serial transport. All platform-specific code is isolated
//! behind the traits defined here.

pub mod error;
pub mod traits;

pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{
    BusClockDivider, GpioInterface, GpioMode, Platform, SerialConfig, SerialInterface,
};
