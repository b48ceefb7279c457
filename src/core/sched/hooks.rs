//! Kernel-driven instrumentation callbacks
//!
//! A kernel hosting the task set invokes these hooks from its scheduling
//! path: once per tick, whenever nothing is runnable, and around every
//! context switch. The trace controller implements them to drive the
//! observability pins; kernels without switch callbacks simply never call
//! the switch pair.

use crate::core::sched::types::TaskId;

/// Scheduling event callbacks.
///
/// All methods default to no-ops so an implementation only picks up the
/// events its kernel can deliver. `()` is the null implementation.
pub trait SchedulerHooks {
    /// Invoked on every kernel tick, from the tick interrupt
    fn on_tick(&mut self) {}

    /// Invoked whenever no task is runnable
    fn on_idle(&mut self) {}

    /// Invoked when the task carrying `tag` is given the CPU
    fn task_switched_in(&mut self, _tag: TaskId) {}

    /// Invoked when the task carrying `tag` loses the CPU
    fn task_switched_out(&mut self, _tag: TaskId) {}
}

impl SchedulerHooks for () {}
