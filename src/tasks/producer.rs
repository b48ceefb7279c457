//! Periodic message producer
//!
//! Publishes a fixed literal into the shared slot every period,
//! unconditionally and independent of any input.

use crate::core::config;
use crate::core::kernel::KernelInterface;
use crate::core::mailbox::MessageSlot;
use crate::core::sched::{PeriodicSchedule, TaskMetadata};
use crate::core::trace::SharedTrace;
use crate::platform::traits::GpioInterface;

/// Unconditional periodic publisher.
pub struct PeriodicProducer<'a> {
    slot: &'a MessageSlot,
    message: &'static str,
    meta: &'static TaskMetadata,
}

impl<'a> PeriodicProducer<'a> {
    /// Create a producer with explicit metadata and message
    pub fn new(slot: &'a MessageSlot, meta: &'static TaskMetadata, message: &'static str) -> Self {
        Self {
            slot,
            message,
            meta,
        }
    }

    /// The standard transmitter task
    pub fn transmitter(slot: &'a MessageSlot) -> Self {
        Self::new(slot, &config::TRANSMITTER_META, config::TRANSMITTER_MESSAGE)
    }

    /// One unit of work: publish the message.
    pub fn publish(&mut self) {
        self.slot.publish(self.message);
    }

    /// Run the producer forever under the hosting kernel.
    pub async fn run<K, T>(mut self, kernel: &K, trace: &SharedTrace<T>)
    where
        K: KernelInterface,
        T: GpioInterface,
    {
        kernel.set_task_tag(self.meta.tag);
        trace.with(|t| t.task_in(self.meta.tag));
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), self.meta.period_ticks);

        loop {
            self.publish();
            schedule.pace(kernel).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_fixed_literal() {
        let slot = MessageSlot::new();
        let mut producer = PeriodicProducer::transmitter(&slot);

        producer.publish();
        assert_eq!(slot.current(), Some(config::TRANSMITTER_MESSAGE));
    }

    #[test]
    fn overwrites_previous_occupant() {
        let slot = MessageSlot::new();
        slot.publish(config::BUTTON_1_RISING);

        let mut producer = PeriodicProducer::transmitter(&slot);
        producer.publish();
        assert_eq!(slot.current(), Some(config::TRANSMITTER_MESSAGE));
    }
}
