//! GPIO trace instrumentation
//!
//! Every scheduling event of interest is mirrored onto a dedicated output
//! pin for an external logic analyzer: one pin pulses per kernel tick, one
//! pin per task is high while that task executes, and one pin is high while
//! nothing runs. The pins feed no state back into scheduling; they exist
//! purely so load, jitter, and deadline misses can be measured off-chip.

use crate::core::sched::hooks::SchedulerHooks;
use crate::core::sched::types::TaskId;
use crate::platform::traits::GpioInterface;

use core::cell::RefCell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Number of per-task identity pins
pub const TASK_PIN_COUNT: usize = 6;

/// Owner of the trace pin set.
///
/// Pin writes never fail on a correctly brought-up board (all pins are
/// claimed as push-pull outputs by [`init_hardware`](crate::bootstrap::init_hardware)),
/// so results are discarded here rather than threaded through the hook path.
pub struct TraceController<G: GpioInterface> {
    tick: G,
    tasks: [G; TASK_PIN_COUNT],
    idle: G,
}

impl<G: GpioInterface> TraceController<G> {
    /// Take ownership of the tick pin, the six task identity pins (indexed
    /// by task tag 1..=6), and the idle pin.
    pub fn new(tick: G, tasks: [G; TASK_PIN_COUNT], idle: G) -> Self {
        Self { tick, tasks, idle }
    }

    /// Drive every trace pin low, the state an analyzer expects at boot
    pub fn clear_all(&mut self) {
        let _ = self.tick.set_low();
        for pin in self.tasks.iter_mut() {
            let _ = pin.set_low();
        }
        let _ = self.idle.set_low();
    }

    /// Mark one kernel tick: a high-then-low pulse on the tick pin.
    ///
    /// The pulse is zero-width as far as this code is concerned; on real
    /// hardware the two register writes give it a measurable width.
    pub fn tick_pulse(&mut self) {
        let _ = self.tick.set_high();
        let _ = self.tick.set_low();
    }

    /// Mark the task carrying `tag` as executing.
    ///
    /// Clears the idle pin: the kernel only hands the CPU to a task when it
    /// is no longer idle, and the idle hook does not clear its own pin.
    pub fn task_in(&mut self, tag: TaskId) {
        let _ = self.idle.set_low();
        if let Some(pin) = self.tasks.get_mut(tag.index()) {
            let _ = pin.set_high();
        }
    }

    /// Mark the task carrying `tag` as no longer executing
    pub fn task_out(&mut self, tag: TaskId) {
        if let Some(pin) = self.tasks.get_mut(tag.index()) {
            let _ = pin.set_low();
        }
    }

    /// Mark the system as idle.
    ///
    /// Forces all six task pins low before raising the idle pin: a task that
    /// was preempted mid-execution never cleared its own pin, and the traces
    /// must never show a task "active" while the system idles. The idle pin
    /// stays high until the next task's entry clears it via [`task_in`](Self::task_in).
    pub fn idle_sweep(&mut self) {
        for pin in self.tasks.iter_mut() {
            let _ = pin.set_low();
        }
        let _ = self.idle.set_high();
    }

    /// The tick pin, for inspection
    pub fn tick_pin(&self) -> &G {
        &self.tick
    }

    /// The identity pin of the task carrying `tag`, for inspection
    pub fn task_pin(&self, tag: TaskId) -> Option<&G> {
        self.tasks.get(tag.index())
    }

    /// The idle pin, for inspection
    pub fn idle_pin(&self) -> &G {
        &self.idle
    }
}

impl<G: GpioInterface> SchedulerHooks for TraceController<G> {
    fn on_tick(&mut self) {
        self.tick_pulse();
    }

    fn on_idle(&mut self) {
        self.idle_sweep();
    }

    fn task_switched_in(&mut self, tag: TaskId) {
        self.task_in(tag);
    }

    fn task_switched_out(&mut self, tag: TaskId) {
        self.task_out(tag);
    }
}

/// Trace controller shared between execution contexts.
///
/// On hardware the tick hook runs in interrupt context while tasks and the
/// idle hook run in thread context, so the controller sits behind a
/// critical-section mutex. `&SharedTrace` itself implements
/// [`SchedulerHooks`], locking around each event.
///
/// # Example
///
/// ```ignore
/// static TRACE: SharedTrace<BoardPin> = SharedTrace::new();
///
/// TRACE.install(board.trace);
/// TRACE.with(|trace| trace.task_in(meta.tag));
/// ```
pub struct SharedTrace<G: GpioInterface> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<Option<TraceController<G>>>>,
}

impl<G: GpioInterface> SharedTrace<G> {
    /// Create an empty shared slot, usable in a `static`
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Move a controller into the shared slot, replacing any previous one
    pub fn install(&self, controller: TraceController<G>) {
        self.inner.lock(|cell| {
            cell.replace(Some(controller));
        });
    }

    /// Run `f` against the installed controller.
    ///
    /// Returns `None` if nothing has been installed yet, which makes trace
    /// calls before bring-up harmless no-ops.
    pub fn with<R>(&self, f: impl FnOnce(&mut TraceController<G>) -> R) -> Option<R> {
        self.inner.lock(|cell| cell.borrow_mut().as_mut().map(f))
    }
}

impl<G: GpioInterface> Default for SharedTrace<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, G: GpioInterface> SchedulerHooks for &'a SharedTrace<G> {
    fn on_tick(&mut self) {
        self.with(|trace| trace.on_tick());
    }

    fn on_idle(&mut self) {
        self.with(|trace| trace.on_idle());
    }

    fn task_switched_in(&mut self, tag: TaskId) {
        self.with(|trace| trace.task_switched_in(tag));
    }

    fn task_switched_out(&mut self, tag: TaskId) {
        self.with(|trace| trace.task_switched_out(tag));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPin;

    fn controller() -> TraceController<MockPin> {
        TraceController::new(
            MockPin::new_output(),
            [
                MockPin::new_output(),
                MockPin::new_output(),
                MockPin::new_output(),
                MockPin::new_output(),
                MockPin::new_output(),
                MockPin::new_output(),
            ],
            MockPin::new_output(),
        )
    }

    #[test]
    fn task_pin_brackets_execution() {
        let mut trace = controller();

        trace.task_in(TaskId(2));
        assert!(trace.task_pin(TaskId(2)).unwrap().read());

        trace.task_out(TaskId(2));
        assert!(!trace.task_pin(TaskId(2)).unwrap().read());
    }

    #[test]
    fn task_entry_clears_idle_pin() {
        let mut trace = controller();
        trace.idle_sweep();
        assert!(trace.idle_pin().read());

        trace.task_in(TaskId(1));
        assert!(!trace.idle_pin().read());
        assert!(trace.task_pin(TaskId(1)).unwrap().read());
    }

    #[test]
    fn idle_sweep_clears_preempted_task_pin() {
        let mut trace = controller();

        // A task preempted mid-execution leaves its pin high
        trace.task_in(TaskId(3));
        assert!(trace.task_pin(TaskId(3)).unwrap().read());

        trace.idle_sweep();
        for tag in 1..=6 {
            assert!(!trace.task_pin(TaskId(tag)).unwrap().read());
        }
        assert!(trace.idle_pin().read());
    }

    #[test]
    fn tick_pulse_ends_low() {
        let mut trace = controller();
        trace.tick_pulse();
        assert!(!trace.tick_pin().read());
    }

    #[test]
    fn out_of_range_tag_is_ignored() {
        let mut trace = controller();
        trace.task_in(TaskId(7));
        trace.task_out(TaskId(7));
        assert!(trace.task_pin(TaskId(7)).is_none());
    }

    #[test]
    fn shared_trace_is_inert_until_installed() {
        let shared: SharedTrace<MockPin> = SharedTrace::new();
        assert_eq!(shared.with(|trace| trace.tick_pulse()), None);

        shared.install(controller());
        assert!(shared.with(|trace| trace.tick_pulse()).is_some());
    }
}
