#![cfg_attr(not(test), no_std)]

//! sched_trace - Deadline-driven periodic task set with GPIO trace instrumentation
//!
//! This library implements a small set of cooperating periodic tasks intended to
//! exercise deadline-driven scheduling (fixed-priority or EDF) against a mix of
//! I/O-bound and CPU-bound workloads: two button monitors, a periodic message
//! producer, a serial transport consumer, and two synthetic load generators.
//! Every task execution is bracketed by trace pin transitions so load, jitter,
//! and deadline misses can be measured externally with a logic analyzer.
//!
//! The hosting kernel, the serial transport, and raw GPIO access are external
//! collaborators reached through traits; mock implementations allow the whole
//! task set to run deterministically on the host.

// Platform abstraction layer (GPIO, serial, hardware bring-up)
pub mod platform;

// Core systems: kernel seam, schedule bookkeeping, mailbox, trace pins, config
pub mod core;

// The six periodic task routines
pub mod tasks;

// Deterministic tick-stepped kernel for host runs
pub mod sim;

// Hardware bring-up and task set registration
pub mod bootstrap;
