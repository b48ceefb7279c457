//! Task set configuration
//!
//! Fixed configuration of the six-task workload: periods, priorities, trace
//! pin assignments, transport settings, and the synthetic load sizes. All of
//! it is const so descriptors can live in flash on embedded targets.

use crate::core::sched::types::{SchedPolicy, TaskId, TaskMetadata};
use crate::platform::traits::SerialConfig;

/// Serial transport baud rate
pub const SERIAL_BAUD_RATE: u32 = 115_200;

/// Platform port identifier of the serial transport
pub const SERIAL_PORT: u8 = 0;

/// Longest message the transport accepts in one send
pub const TRANSPORT_MTU: usize = 150;

/// Iteration count of the first synthetic workload
pub const LOAD_1_ITERATIONS: u32 = 36_500;

/// Iteration count of the second synthetic workload
pub const LOAD_2_ITERATIONS: u32 = 90_000;

/// Stack budget handed to the kernel for every task, in machine words
pub const MIN_STACK_WORDS: usize = 128;

/// Trace and input pin assignments.
///
/// Pin numbers 0..=7 are the trace outputs: the tick marker, the six task
/// identity pins selected by task tag, and the idle marker. The two button
/// inputs follow.
pub mod pins {
    /// Tick marker output
    pub const TICK: u8 = 0;

    /// Idle marker output
    pub const IDLE: u8 = 7;

    /// First button input
    pub const BUTTON_1: u8 = 8;

    /// Second button input
    pub const BUTTON_2: u8 = 9;

    /// Identity pin of the task carrying `tag`
    pub const fn task(tag: u8) -> u8 {
        tag
    }
}

/// Published on a low-to-high transition of button 1
pub const BUTTON_1_RISING: &str = "Button 1 RISING\n";
/// Published on a high-to-low transition of button 1
pub const BUTTON_1_FALLING: &str = "Button 1 FALLING\n";
/// Published on a low-to-high transition of button 2
pub const BUTTON_2_RISING: &str = "Button 2 RISING\n";
/// Published on a high-to-low transition of button 2
pub const BUTTON_2_FALLING: &str = "Button 2 FALLING\n";
/// Published unconditionally by the periodic producer
pub const TRANSMITTER_MESSAGE: &str = "TRANSMITTER\n";

/// Button 1 monitor, sampled every 50 ticks
pub const BUTTON_1_META: TaskMetadata = TaskMetadata {
    name: "BTN1",
    tag: TaskId(1),
    period_ticks: 50,
    deadline_ticks: None,
    priority: 1,
    stack_words: MIN_STACK_WORDS,
};

/// Button 2 monitor, sampled every 50 ticks
pub const BUTTON_2_META: TaskMetadata = TaskMetadata {
    name: "BTN2",
    tag: TaskId(2),
    period_ticks: 50,
    deadline_ticks: None,
    priority: 1,
    stack_words: MIN_STACK_WORDS,
};

/// Periodic producer, publishing every 100 ticks
pub const TRANSMITTER_META: TaskMetadata = TaskMetadata {
    name: "TRANS",
    tag: TaskId(3),
    period_ticks: 100,
    deadline_ticks: None,
    priority: 1,
    stack_words: MIN_STACK_WORDS,
};

/// Transport consumer, draining the slot every 20 ticks
pub const RECEIVER_META: TaskMetadata = TaskMetadata {
    name: "REC",
    tag: TaskId(4),
    period_ticks: 20,
    deadline_ticks: None,
    priority: 1,
    stack_words: MIN_STACK_WORDS,
};

/// First load generator, released every 10 ticks
pub const LOAD_1_META: TaskMetadata = TaskMetadata {
    name: "LOAD1",
    tag: TaskId(5),
    period_ticks: 10,
    deadline_ticks: None,
    priority: 1,
    stack_words: MIN_STACK_WORDS,
};

/// Second load generator, released every 100 ticks
pub const LOAD_2_META: TaskMetadata = TaskMetadata {
    name: "LOAD2",
    tag: TaskId(6),
    period_ticks: 100,
    deadline_ticks: None,
    priority: 1,
    stack_words: MIN_STACK_WORDS,
};

/// The full task set in tag order
pub const TASK_SET: [TaskMetadata; 6] = [
    BUTTON_1_META,
    BUTTON_2_META,
    TRANSMITTER_META,
    RECEIVER_META,
    LOAD_1_META,
    LOAD_2_META,
];

/// Bootstrap-time configuration of the task set
#[derive(Debug, Clone, Copy)]
pub struct TaskSetConfig {
    /// Scheduling policy the hosting kernel applies
    pub policy: SchedPolicy,

    /// Serial transport configuration
    pub serial: SerialConfig,
}

impl Default for TaskSetConfig {
    fn default() -> Self {
        Self {
            policy: SchedPolicy::default(),
            serial: SerialConfig {
                baud_rate: SERIAL_BAUD_RATE,
            },
        }
    }
}
