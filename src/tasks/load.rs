//! Synthetic CPU load generators
//!
//! Two periodic tasks that produce no data and exist only to occupy the
//! scheduler for a deterministic amount of work per period, so the whole
//! task set can be load-tested against its deadlines. The work itself is an
//! injectable strategy: production uses a bounded spin loop, tests inject
//! counting workloads that run in zero time.

use crate::core::config;
use crate::core::kernel::KernelInterface;
use crate::core::sched::{PeriodicSchedule, TaskMetadata};
use crate::core::trace::SharedTrace;
use crate::platform::traits::GpioInterface;

/// One period's worth of synthetic work
pub trait Workload {
    /// Perform the work; must be bounded
    fn execute(&mut self);
}

/// Busy-wait workload burning a fixed number of loop iterations
#[derive(Debug, Clone, Copy)]
pub struct SpinWorkload {
    iterations: u32,
}

impl SpinWorkload {
    /// Create a workload of `iterations` spin-loop rounds
    pub const fn new(iterations: u32) -> Self {
        Self { iterations }
    }
}

impl Workload for SpinWorkload {
    fn execute(&mut self) {
        for _ in 0..self.iterations {
            core::hint::spin_loop();
        }
    }
}

/// Periodic load generator.
pub struct LoadSimulator<W: Workload> {
    workload: W,
    meta: &'static TaskMetadata,
}

impl<W: Workload> LoadSimulator<W> {
    /// Create a load generator with explicit metadata and workload
    pub fn new(meta: &'static TaskMetadata, workload: W) -> Self {
        Self { workload, meta }
    }

    /// One unit of work.
    pub fn execute(&mut self) {
        self.workload.execute();
    }

    /// Run the load generator forever under the hosting kernel.
    pub async fn run<K, T>(mut self, kernel: &K, trace: &SharedTrace<T>)
    where
        K: KernelInterface,
        T: GpioInterface,
    {
        kernel.set_task_tag(self.meta.tag);
        trace.with(|t| t.task_in(self.meta.tag));
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), self.meta.period_ticks);

        loop {
            self.execute();
            schedule.pace(kernel).await;
        }
    }
}

impl LoadSimulator<SpinWorkload> {
    /// The standard first load generator
    pub fn load_1() -> Self {
        Self::new(
            &config::LOAD_1_META,
            SpinWorkload::new(config::LOAD_1_ITERATIONS),
        )
    }

    /// The standard second load generator
    pub fn load_2() -> Self {
        Self::new(
            &config::LOAD_2_META,
            SpinWorkload::new(config::LOAD_2_ITERATIONS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingWorkload {
        runs: u32,
    }

    impl Workload for CountingWorkload {
        fn execute(&mut self) {
            self.runs += 1;
        }
    }

    #[test]
    fn injected_workload_runs_once_per_execute() {
        let mut load = LoadSimulator::new(&config::LOAD_1_META, CountingWorkload { runs: 0 });
        load.execute();
        load.execute();
        assert_eq!(load.workload.runs, 2);
    }

    #[test]
    fn spin_workload_terminates() {
        let mut workload = SpinWorkload::new(1000);
        workload.execute();
    }

    #[test]
    fn standard_generators_carry_distinct_workloads() {
        let load_1 = LoadSimulator::load_1();
        let load_2 = LoadSimulator::load_2();
        assert_eq!(load_1.workload.iterations, config::LOAD_1_ITERATIONS);
        assert_eq!(load_2.workload.iterations, config::LOAD_2_ITERATIONS);
    }
}
