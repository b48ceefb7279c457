//! Deterministic tick-stepped kernel for host runs
//!
//! [`SimKernel`] hosts the task bodies off-target: it owns simulated time,
//! releases tasks on their period boundaries, arbitrates the CPU under
//! either scheduling policy, drives the instrumentation hooks, and accounts
//! statistics. Task bodies are closures that perform one activation's work
//! and report its modeled execution cost in ticks, so a whole run is exactly
//! reproducible.
//!
//! The release bookkeeping mirrors what the tasks themselves do on hardware:
//! a task's anchor is the tick at which its body actually started, and the
//! next release lands one period after that anchor. A body that outruns its
//! period is re-released immediately and its phase drifts by the overrun.

use crate::core::sched::hooks::SchedulerHooks;
use crate::core::sched::types::{
    tick_reached, ticks_until, SchedPolicy, SchedulerStats, TaskId, TaskMetadata, TaskStats, Tick,
};

use core::fmt;
use heapless::Vec;

/// Capacity of the simulated task table
pub const MAX_TASKS: usize = 8;

/// Bootstrap-time kernel failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KernelError {
    /// The task table is full
    OutOfTaskSlots,
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::OutOfTaskSlots => write!(f, "out of task slots"),
        }
    }
}

/// Lifecycle of one task between releases
enum Activation {
    /// Waiting for its next release tick
    Sleeping { wake_at: Tick },
    /// Released, body not yet started
    Ready,
    /// Body started, consuming its remaining cost
    Running { remaining: Tick },
}

struct TaskSlot<'a> {
    meta: TaskMetadata,
    body: &'a mut dyn FnMut(Tick) -> Tick,
    state: Activation,
    /// Tick at which the body last started
    anchor: Tick,
    /// Absolute deadline of the current activation
    deadline: Tick,
    stats: TaskStats,
}

/// Tick-stepped preemptive scheduler hosting the task set on the host.
///
/// A body closure is invoked once per activation, at the tick its task first
/// gets the CPU; the returned cost (at least one tick) is then consumed
/// before the task completes and sleeps until its next period boundary.
/// Preemption is re-evaluated every tick.
///
/// # Example
///
/// ```
/// use sched_trace::core::sched::{SchedPolicy, TaskId, TaskMetadata, Tick};
/// use sched_trace::sim::SimKernel;
///
/// const META: TaskMetadata = TaskMetadata {
///     name: "tick10",
///     tag: TaskId(1),
///     period_ticks: 10,
///     deadline_ticks: None,
///     priority: 1,
///     stack_words: 128,
/// };
///
/// let mut body = |_now: Tick| -> Tick { 1 };
/// let mut kernel = SimKernel::new(SchedPolicy::FixedPriority, ());
/// kernel.register(META, &mut body).unwrap();
/// kernel.run(100);
/// assert_eq!(kernel.task_stats(TaskId(1)).unwrap().invocations, 10);
/// ```
pub struct SimKernel<'a, H: SchedulerHooks> {
    tasks: Vec<TaskSlot<'a>, MAX_TASKS>,
    policy: SchedPolicy,
    hooks: H,
    now: Tick,
    running: Option<usize>,
    stats: SchedulerStats,
}

impl<'a, H: SchedulerHooks> SimKernel<'a, H> {
    /// Create an empty kernel at tick 0
    pub fn new(policy: SchedPolicy, hooks: H) -> Self {
        Self {
            tasks: Vec::new(),
            policy,
            hooks,
            now: 0,
            running: None,
            stats: SchedulerStats::default(),
        }
    }

    /// Register a task; it is released immediately.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::OutOfTaskSlots`] when the task table is full.
    pub fn register(
        &mut self,
        meta: TaskMetadata,
        body: &'a mut dyn FnMut(Tick) -> Tick,
    ) -> Result<TaskId, KernelError> {
        let deadline = self.now.wrapping_add(meta.relative_deadline());
        let slot = TaskSlot {
            meta,
            body,
            state: Activation::Ready,
            anchor: self.now,
            deadline,
            stats: TaskStats::default(),
        };
        self.tasks
            .push(slot)
            .map_err(|_| KernelError::OutOfTaskSlots)?;
        crate::log_debug!(
            "registered task {} tag {} period {}",
            meta.name,
            meta.tag.0,
            meta.period_ticks
        );
        Ok(meta.tag)
    }

    /// Advance simulated time by `ticks`
    pub fn run(&mut self, ticks: Tick) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Advance simulated time by one tick
    pub fn step(&mut self) {
        self.stats.uptime_ticks += 1;
        self.hooks.on_tick();
        let now = self.now;

        // Release tasks whose wake tick arrived
        for slot in self.tasks.iter_mut() {
            if let Activation::Sleeping { wake_at } = slot.state {
                if tick_reached(now, wake_at) {
                    slot.state = Activation::Ready;
                    slot.deadline = now.wrapping_add(slot.meta.relative_deadline());
                }
            }
        }

        let choice = self.pick();
        if choice != self.running {
            if let Some(prev) = self.running {
                self.hooks.task_switched_out(self.tasks[prev].meta.tag);
            }
            if let Some(next) = choice {
                self.hooks.task_switched_in(self.tasks[next].meta.tag);
            }
            self.running = choice;
        }

        match choice {
            None => {
                self.hooks.on_idle();
                self.stats.idle_ticks += 1;
            }
            Some(i) => {
                let slot = &mut self.tasks[i];
                if matches!(slot.state, Activation::Ready) {
                    // The body gets the CPU: anchor to the actual start
                    slot.anchor = now;
                    let cost = (slot.body)(now);
                    slot.stats.invocations += 1;
                    slot.state = Activation::Running {
                        remaining: cost.max(1),
                    };
                }
                if let Activation::Running { remaining } = &mut slot.state {
                    *remaining -= 1;
                    if *remaining == 0 {
                        let over = ticks_until(slot.deadline, now);
                        let lateness = if over > 0 { over as Tick } else { 0 };
                        slot.stats.record_completion(lateness);
                        if lateness > 0 {
                            self.stats.total_deadline_misses += 1;
                        }
                        slot.state = Activation::Sleeping {
                            wake_at: slot.anchor.wrapping_add(slot.meta.period_ticks),
                        };
                    }
                }
            }
        }

        self.now = now.wrapping_add(1);
    }

    /// Choose who gets the CPU this tick
    fn pick(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, slot) in self.tasks.iter().enumerate() {
            if !matches!(
                slot.state,
                Activation::Ready | Activation::Running { .. }
            ) {
                continue;
            }
            best = match best {
                None => Some(i),
                Some(incumbent) if self.preferred(i, incumbent) => Some(i),
                Some(incumbent) => Some(incumbent),
            };
        }
        best
    }

    /// Whether `challenger` displaces `incumbent` under the active policy
    fn preferred(&self, challenger: usize, incumbent: usize) -> bool {
        let c = &self.tasks[challenger];
        let b = &self.tasks[incumbent];
        match self.policy {
            SchedPolicy::FixedPriority => {
                if c.meta.priority != b.meta.priority {
                    return c.meta.priority > b.meta.priority;
                }
            }
            SchedPolicy::EarliestDeadlineFirst => {
                let dc = ticks_until(self.now, c.deadline);
                let db = ticks_until(self.now, b.deadline);
                if dc != db {
                    return dc < db;
                }
            }
        }
        // On a tie the task holding the CPU keeps it; otherwise the
        // earlier-registered task (the incumbent) wins.
        self.running == Some(challenger)
    }

    /// Current simulated tick
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Active scheduling policy
    pub fn policy(&self) -> SchedPolicy {
        self.policy
    }

    /// Accumulated scheduler statistics
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Statistics of the task carrying `tag`
    pub fn task_stats(&self, tag: TaskId) -> Option<TaskStats> {
        self.tasks
            .iter()
            .find(|slot| slot.meta.tag == tag)
            .map(|slot| slot.stats)
    }

    /// The installed hooks, for inspection
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Consume the kernel and hand back its hooks
    pub fn into_hooks(self) -> H {
        self.hooks
    }
}
