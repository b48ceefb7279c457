//! Scheduling types and per-task pacing
//!
//! This module provides the types a hosting kernel needs to run the task set:
//! task descriptors, runtime statistics, the wake-time schedule each task
//! keeps, and the hook surface the kernel drives for trace instrumentation.
//!
//! # Components
//!
//! - [`types`]: core types (`Tick`, `TaskId`, `TaskMetadata`, stats)
//! - [`schedule`]: per-task absolute wake-time bookkeeping
//! - [`hooks`]: kernel-driven instrumentation callbacks

pub mod hooks;
pub mod schedule;
pub mod types;

pub use hooks::SchedulerHooks;
pub use schedule::PeriodicSchedule;
pub use types::{SchedPolicy, SchedulerStats, TaskId, TaskMetadata, TaskStats, Tick};
