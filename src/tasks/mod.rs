//! The six periodic task routines
//!
//! Every task follows the same shape: on first entry it tags itself with its
//! stable identity and raises its trace pin once, anchors a
//! [`PeriodicSchedule`](crate::core::sched::PeriodicSchedule) at the current
//! tick, then loops forever performing one bounded unit of work and pacing
//! to the next absolute period boundary. Tasks never return and carry no
//! error channel; a unit of work that outruns its period is observable only
//! on the trace pins.
//!
//! The units of work are exposed as ordinary methods (`poll`, `publish`,
//! `forward`, `execute`) so the bodies can also be hosted by the simulated
//! kernel or exercised directly in tests.

pub mod button;
pub mod consumer;
pub mod load;
pub mod producer;

pub use button::{ButtonMonitor, Edge, EdgeDetector};
pub use consumer::TransportConsumer;
pub use load::{LoadSimulator, SpinWorkload, Workload};
pub use producer::PeriodicProducer;
