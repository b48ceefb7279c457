//! Hardware bring-up and task set assembly
//!
//! One-time board initialization: serial transport at the configured baud
//! rate, the trace and button pins, the free-running trace timer, and the
//! peripheral bus clock. Everything returns `Result`, so a board that cannot
//! be brought up is reported instead of silently spinning.

use crate::core::config::{self, pins, TaskSetConfig};
use crate::core::trace::TraceController;
use crate::platform::traits::{BusClockDivider, GpioMode, Platform};
use crate::platform::Result;

/// Everything bring-up hands back to the caller.
///
/// The trace controller is ready to be installed into a shared slot; the
/// serial port and button pins are handed to the consumer and monitor tasks
/// at construction.
pub struct Board<P: Platform> {
    /// The initialized platform, for anything claimed later
    pub platform: P,

    /// Serial transport for the consumer task
    pub serial: P::Serial,

    /// Button 1 input
    pub button_1: P::Gpio,

    /// Button 2 input
    pub button_2: P::Gpio,

    /// Trace pin controller, all pins driven low
    pub trace: TraceController<P::Gpio>,
}

/// Bring up the board and claim every peripheral the task set uses.
///
/// Performed once, before task registration. The trace pins come back
/// cleared so an attached analyzer starts from a known-low baseline.
///
/// # Errors
///
/// Returns the first platform error encountered; a partially brought-up
/// board is not usable and the caller should treat this as fatal.
pub fn init_hardware<P: Platform>(config: &TaskSetConfig) -> Result<Board<P>> {
    let mut platform = P::init()?;

    let serial = platform.create_serial(config::SERIAL_PORT, config.serial)?;

    let tick = platform.claim_pin(pins::TICK, GpioMode::OutputPushPull)?;
    let tasks = [
        platform.claim_pin(pins::task(1), GpioMode::OutputPushPull)?,
        platform.claim_pin(pins::task(2), GpioMode::OutputPushPull)?,
        platform.claim_pin(pins::task(3), GpioMode::OutputPushPull)?,
        platform.claim_pin(pins::task(4), GpioMode::OutputPushPull)?,
        platform.claim_pin(pins::task(5), GpioMode::OutputPushPull)?,
        platform.claim_pin(pins::task(6), GpioMode::OutputPushPull)?,
    ];
    let idle = platform.claim_pin(pins::IDLE, GpioMode::OutputPushPull)?;

    let button_1 = platform.claim_pin(pins::BUTTON_1, GpioMode::Input)?;
    let button_2 = platform.claim_pin(pins::BUTTON_2, GpioMode::Input)?;

    platform.start_trace_timer()?;
    platform.set_bus_divider(BusClockDivider::Full)?;

    let mut trace = TraceController::new(tick, tasks, idle);
    trace.clear_all();

    crate::log_info!(
        "hardware ready: {} baud, {:?} scheduling",
        config.serial.baud_rate,
        config.policy
    );

    Ok(Board {
        platform,
        serial,
        button_1,
        button_2,
        trace,
    })
}
