//! Kernel scheduling seam
//!
//! The hosting kernel is an external collaborator: it owns the tick counter,
//! suspends tasks until absolute tick values, and carries each task's numeric
//! tag so context-switch instrumentation can identify who is running. This
//! module abstracts those primitives behind [`KernelInterface`]:
//! - [`MockKernel`] for host testing with controllable time
//! - [`EmbassyKernel`] (feature `embassy`) backed by the embassy time driver

use crate::core::sched::types::{tick_reached, TaskId, Tick};

use core::cell::{Cell, RefCell};
use embassy_futures::yield_now;
use heapless::Vec;

/// Kernel primitives the periodic tasks rely on.
///
/// The delay target is an absolute tick value, not a duration relative to
/// now: scheduling jitter in one iteration must not shift the target of the
/// next. Anchor bookkeeping on top of this primitive lives in
/// [`PeriodicSchedule`](crate::core::sched::PeriodicSchedule).
#[allow(async_fn_in_trait)]
pub trait KernelInterface {
    /// Current value of the kernel tick counter
    fn tick_count(&self) -> Tick;

    /// Suspend the calling task until the tick counter reaches `target`.
    ///
    /// Returns immediately if `target` has already passed.
    async fn delay_until(&self, target: Tick);

    /// Attach a stable numeric identity to the calling task.
    ///
    /// Kernels that trace context switches report this tag back through
    /// [`SchedulerHooks`](crate::core::sched::SchedulerHooks).
    fn set_task_tag(&self, tag: TaskId);
}

/// Capacity of the recorded wake-target history
const WAKE_CAPACITY: usize = 64;

/// Mock kernel for testing with controllable time.
///
/// The tick counter only moves when a test advances it or when a task blocks
/// in [`delay_until`](KernelInterface::delay_until): a pending delay jumps
/// the counter straight to its target, modelling an ideal kernel with nothing
/// else runnable. Every requested wake target is recorded so tests can check
/// a task's pacing without instrumenting the task itself.
///
/// # Example
///
/// ```
/// use sched_trace::core::kernel::{KernelInterface, MockKernel};
///
/// let kernel = MockKernel::new();
/// embassy_futures::block_on(kernel.delay_until(50));
/// assert_eq!(kernel.tick_count(), 50);
/// assert_eq!(kernel.wake_targets().as_slice(), &[50]);
/// ```
#[derive(Default)]
pub struct MockKernel {
    current: Cell<Tick>,
    wake_targets: RefCell<Vec<Tick, WAKE_CAPACITY>>,
    tags: RefCell<Vec<TaskId, 8>>,
}

impl MockKernel {
    /// Create a new mock kernel starting at tick 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mock kernel starting at the given tick
    pub fn with_tick(tick: Tick) -> Self {
        let kernel = Self::default();
        kernel.current.set(tick);
        kernel
    }

    /// Advance the tick counter by `ticks`, e.g. to model task body duration
    pub fn advance(&self, ticks: Tick) {
        self.current.set(self.current.get().wrapping_add(ticks));
    }

    /// Set the tick counter to an absolute value
    pub fn set_tick(&self, tick: Tick) {
        self.current.set(tick);
    }

    /// All wake targets requested so far, in order
    pub fn wake_targets(&self) -> Vec<Tick, WAKE_CAPACITY> {
        self.wake_targets.borrow().clone()
    }

    /// All task tags registered so far, in order
    pub fn tags(&self) -> Vec<TaskId, 8> {
        self.tags.borrow().clone()
    }
}

impl KernelInterface for MockKernel {
    fn tick_count(&self) -> Tick {
        self.current.get()
    }

    async fn delay_until(&self, target: Tick) {
        let _ = self.wake_targets.borrow_mut().push(target);
        yield_now().await;
        if !tick_reached(self.current.get(), target) {
            self.current.set(target);
        }
    }

    fn set_task_tag(&self, tag: TaskId) {
        let _ = self.tags.borrow_mut().push(tag);
    }
}

/// Kernel seam backed by the embassy time driver.
///
/// One embassy timer tick is one kernel tick, truncated to the [`Tick`]
/// width. The executor has no task-tag notion and no context-switch
/// callbacks, so [`set_task_tag`](KernelInterface::set_task_tag) is a no-op
/// and per-task trace pins are driven by each task's entry pulse only.
#[cfg(feature = "embassy")]
#[derive(Clone, Copy, Default)]
pub struct EmbassyKernel;

#[cfg(feature = "embassy")]
impl KernelInterface for EmbassyKernel {
    fn tick_count(&self) -> Tick {
        embassy_time::Instant::now().as_ticks() as Tick
    }

    async fn delay_until(&self, target: Tick) {
        let now = embassy_time::Instant::now();
        let delta = crate::core::sched::types::ticks_until(now.as_ticks() as Tick, target);
        if delta > 0 {
            embassy_time::Timer::at(now + embassy_time::Duration::from_ticks(delta as u64)).await;
        }
    }

    fn set_task_tag(&self, _tag: TaskId) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn delay_jumps_to_target() {
        let kernel = MockKernel::new();
        block_on(kernel.delay_until(100));
        assert_eq!(kernel.tick_count(), 100);

        block_on(kernel.delay_until(120));
        assert_eq!(kernel.tick_count(), 120);
        assert_eq!(kernel.wake_targets().as_slice(), &[100, 120]);
    }

    #[test]
    fn delay_past_target_returns_immediately() {
        let kernel = MockKernel::with_tick(200);
        block_on(kernel.delay_until(150));
        // Time never moves backwards
        assert_eq!(kernel.tick_count(), 200);
        assert_eq!(kernel.wake_targets().as_slice(), &[150]);
    }

    #[test]
    fn advance_models_body_duration() {
        let kernel = MockKernel::new();
        kernel.advance(7);
        assert_eq!(kernel.tick_count(), 7);

        block_on(kernel.delay_until(50));
        assert_eq!(kernel.tick_count(), 50);
    }

    #[test]
    fn tags_are_recorded() {
        let kernel = MockKernel::new();
        kernel.set_task_tag(TaskId(3));
        kernel.set_task_tag(TaskId(5));
        assert_eq!(kernel.tags().as_slice(), &[TaskId(3), TaskId(5)]);
    }
}
