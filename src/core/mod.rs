//! Core systems
//!
//! Everything the six tasks share: the kernel seam, periodic schedule
//! bookkeeping, the message mailbox, trace pin control, task set
//! configuration, and logging.

pub mod config;
pub mod kernel;
pub mod logging;
pub mod mailbox;
pub mod sched;
pub mod trace;

pub use kernel::KernelInterface;
pub use mailbox::MessageSlot;
pub use sched::{PeriodicSchedule, SchedPolicy, SchedulerHooks, TaskId, TaskMetadata, Tick};
pub use trace::{SharedTrace, TraceController};
