//! Core types for the periodic task set
//!
//! This module defines the fundamental scheduling types: the kernel tick,
//! task identity and metadata, the scheduling policy switch, and the
//! statistics a hosting kernel accumulates while running the set.

/// Kernel tick counter value
///
/// Matches the width of a typical kernel tick counter and wraps accordingly;
/// comparisons must go through [`tick_reached`] / [`ticks_until`] rather than
/// plain ordering.
pub type Tick = u32;

/// Whether `now` has reached or passed `target`, tolerating counter wrap.
///
/// Valid as long as the two values are within half the counter range of each
/// other, which holds for any realistic period.
#[inline]
pub fn tick_reached(now: Tick, target: Tick) -> bool {
    now.wrapping_sub(target) as i32 >= 0
}

/// Signed distance from `now` to `target` in ticks (negative if `target`
/// already passed).
#[inline]
pub fn ticks_until(now: Tick, target: Tick) -> i32 {
    target.wrapping_sub(now) as i32
}

/// Stable numeric task identity
///
/// Doubles as the task's kernel tag and as the index into the trace pin
/// map, so it is fixed at bootstrap and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskId(pub u8);

impl TaskId {
    /// Zero-based position of this task in per-task tables
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize - 1
    }
}

/// Scheduling policy the hosting kernel applies to the task set
///
/// The task set itself is policy-agnostic; the descriptors carry both a
/// priority and a deadline so either policy can be selected at bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedPolicy {
    /// Preemptive fixed-priority scheduling; ties run in registration order
    #[default]
    FixedPriority,
    /// Earliest-deadline-first by each task's absolute deadline
    EarliestDeadlineFirst,
}

/// Periodic task descriptor registered at bootstrap
///
/// Created once, immutable thereafter; the hosting kernel owns the
/// registered copy for the lifetime of the system.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskMetadata {
    /// Human-readable task name for logging and debugging
    pub name: &'static str,

    /// Stable numeric identity, also the trace pin selector
    pub tag: TaskId,

    /// Release period in kernel ticks
    pub period_ticks: Tick,

    /// Relative deadline in ticks; `None` means deadline equals period
    pub deadline_ticks: Option<Tick>,

    /// Priority under fixed-priority scheduling (higher runs first)
    pub priority: u8,

    /// Stack budget in machine words, passed through to the kernel at
    /// registration
    pub stack_words: usize,
}

impl TaskMetadata {
    /// Relative deadline, defaulting to the period
    #[inline]
    pub const fn relative_deadline(&self) -> Tick {
        match self.deadline_ticks {
            Some(d) => d,
            None => self.period_ticks,
        }
    }
}

/// Runtime statistics for a single task
///
/// Updated by the hosting kernel after each completed activation.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskStats {
    /// Number of times the task body has been invoked
    pub invocations: u32,

    /// Completions that landed after the absolute deadline
    pub deadline_misses: u32,

    /// Worst observed completion lateness in ticks (0 if never late)
    pub worst_lateness: Tick,
}

impl TaskStats {
    /// Record one completed activation.
    ///
    /// `lateness` is how far past the absolute deadline the completion
    /// landed; zero for an on-time completion.
    pub fn record_completion(&mut self, lateness: Tick) {
        if lateness > 0 {
            self.deadline_misses = self.deadline_misses.saturating_add(1);
            if lateness > self.worst_lateness {
                self.worst_lateness = lateness;
            }
        }
    }
}

/// Global scheduler statistics
///
/// One value per kernel instance, owned by whoever runs the task set. The
/// fields correspond to the classic run-time-stats counters: system time,
/// idle time, miss count, and a derived CPU load figure.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerStats {
    /// Ticks elapsed since the scheduler started
    pub uptime_ticks: u64,

    /// Ticks during which no task was runnable
    pub idle_ticks: u64,

    /// Deadline misses summed over all tasks
    pub total_deadline_misses: u32,
}

impl SchedulerStats {
    /// CPU load over the whole run, as a percentage
    pub fn cpu_load_percent(&self) -> u8 {
        if self.uptime_ticks == 0 {
            return 0;
        }
        let busy = self.uptime_ticks - self.idle_ticks;
        (busy * 100 / self.uptime_ticks) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_reached_handles_wrap() {
        assert!(tick_reached(100, 100));
        assert!(tick_reached(101, 100));
        assert!(!tick_reached(99, 100));

        // Across the wrap boundary
        assert!(tick_reached(5, Tick::MAX - 10));
        assert!(!tick_reached(Tick::MAX - 10, 5));
    }

    #[test]
    fn ticks_until_signed_distance() {
        assert_eq!(ticks_until(100, 150), 50);
        assert_eq!(ticks_until(150, 100), -50);
        assert_eq!(ticks_until(Tick::MAX, 4), 5);
    }

    #[test]
    fn deadline_defaults_to_period() {
        let meta = TaskMetadata {
            name: "t",
            tag: TaskId(1),
            period_ticks: 50,
            deadline_ticks: None,
            priority: 1,
            stack_words: 128,
        };
        assert_eq!(meta.relative_deadline(), 50);

        let tight = TaskMetadata {
            deadline_ticks: Some(20),
            ..meta
        };
        assert_eq!(tight.relative_deadline(), 20);
    }

    #[test]
    fn stats_track_misses_and_lateness() {
        let mut stats = TaskStats::default();
        stats.record_completion(0);
        assert_eq!(stats.deadline_misses, 0);

        stats.record_completion(7);
        stats.record_completion(3);
        assert_eq!(stats.deadline_misses, 2);
        assert_eq!(stats.worst_lateness, 7);
    }

    #[test]
    fn cpu_load_from_idle_share() {
        let stats = SchedulerStats {
            uptime_ticks: 1000,
            idle_ticks: 250,
            total_deadline_misses: 0,
        };
        assert_eq!(stats.cpu_load_percent(), 75);
        assert_eq!(SchedulerStats::default().cpu_load_percent(), 0);
    }
}
