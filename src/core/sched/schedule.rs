//! Per-task absolute wake-time bookkeeping
//!
//! Each periodic task keeps one [`PeriodicSchedule`]: an anchor tick that
//! advances by exactly the task's period per iteration, so jitter in one
//! iteration does not accumulate into the next.

use crate::core::kernel::KernelInterface;
use crate::core::sched::types::Tick;

/// Wake-time anchor for one periodic task.
///
/// [`pace`](Self::pace) suspends the task until `anchor + period` and then
/// re-reads the tick counter into the anchor. After an overrun the anchor
/// lands on the actual wake time rather than the requested target, so the
/// task resumes its period from where it really woke instead of bursting to
/// catch up. The cost is that phase drifts by the overrun amount.
#[derive(Debug, Clone, Copy)]
pub struct PeriodicSchedule {
    period: Tick,
    last_wake: Tick,
}

impl PeriodicSchedule {
    /// Start a schedule anchored at `now`
    pub fn start(now: Tick, period: Tick) -> Self {
        Self {
            period,
            last_wake: now,
        }
    }

    /// Release period in ticks
    pub fn period(&self) -> Tick {
        self.period
    }

    /// Anchor of the current iteration
    pub fn last_wake(&self) -> Tick {
        self.last_wake
    }

    /// Target tick of the next wake
    pub fn next_wake(&self) -> Tick {
        self.last_wake.wrapping_add(self.period)
    }

    /// Suspend until the next period boundary and re-anchor.
    pub async fn pace<K: KernelInterface>(&mut self, kernel: &K) {
        kernel.delay_until(self.next_wake()).await;
        self.last_wake = kernel.tick_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::MockKernel;
    use embassy_futures::block_on;

    #[test]
    fn anchors_advance_by_exactly_one_period() {
        let kernel = MockKernel::new();
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), 50);

        block_on(async {
            for _ in 0..4 {
                // Body durations vary but stay below the period
                kernel.advance(7);
                schedule.pace(&kernel).await;
            }
        });

        assert_eq!(kernel.wake_targets().as_slice(), &[50, 100, 150, 200]);
        assert_eq!(schedule.last_wake(), 200);
    }

    #[test]
    fn overrun_reanchors_to_actual_wake() {
        let kernel = MockKernel::new();
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), 50);

        block_on(async {
            // Body overruns the period: the delay target of 50 has already
            // passed, so the task wakes at 120 and anchors there.
            kernel.advance(120);
            schedule.pace(&kernel).await;
        });
        assert_eq!(schedule.last_wake(), 120);
        assert_eq!(schedule.next_wake(), 170);

        // The following iteration paces normally from the drifted anchor
        block_on(schedule.pace(&kernel));
        assert_eq!(schedule.last_wake(), 170);
    }

    #[test]
    fn anchor_survives_counter_wrap() {
        let kernel = MockKernel::with_tick(Tick::MAX - 10);
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), 50);

        block_on(schedule.pace(&kernel));
        assert_eq!(schedule.last_wake(), (Tick::MAX - 10).wrapping_add(50));
    }
}
