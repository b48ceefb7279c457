//! Serial transport consumer
//!
//! Once per period this task forwards the slot's current message over the
//! serial transport. A busy transport is retried until it accepts, and the
//! wake anchor is untouched while retrying: the task's pacing is suspended
//! for as long as the transport refuses, and it can monopolize its priority
//! level if the transport never accepts.

use crate::core::config::{self, TRANSPORT_MTU};
use crate::core::kernel::KernelInterface;
use crate::core::mailbox::MessageSlot;
use crate::core::sched::{PeriodicSchedule, TaskMetadata};
use crate::core::trace::SharedTrace;
use crate::platform::traits::{GpioInterface, SerialInterface};

use embassy_futures::yield_now;

/// Slot-to-serial forwarder.
///
/// The slot is lossy by design, so the forwarded stream may repeat a message
/// the consumer already sent or skip one that was overwritten between two of
/// its periods.
pub struct TransportConsumer<'a, S: SerialInterface> {
    slot: &'a MessageSlot,
    serial: S,
    meta: &'static TaskMetadata,
}

impl<'a, S: SerialInterface> TransportConsumer<'a, S> {
    /// Create the standard receiver task
    pub fn new(slot: &'a MessageSlot, serial: S) -> Self {
        Self {
            slot,
            serial,
            meta: &config::RECEIVER_META,
        }
    }

    /// The underlying transport, for inspection
    pub fn serial(&self) -> &S {
        &self.serial
    }

    /// One unit of work: forward the current message, retrying while the
    /// transport is busy. Returns the number of send attempts made.
    ///
    /// An empty slot forwards nothing. Messages longer than the transport
    /// limit are truncated. A hard transport fault drops the message for
    /// this period instead of retrying.
    pub async fn forward(&mut self) -> u32 {
        let Some(message) = self.slot.current() else {
            return 0;
        };
        let bytes = message.as_bytes();
        let frame = &bytes[..bytes.len().min(TRANSPORT_MTU)];

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.serial.try_send(frame) {
                Ok(true) => break,
                Ok(false) => yield_now().await,
                Err(err) => {
                    crate::log_error!("transport fault, message dropped: {:?}", err);
                    break;
                }
            }
        }
        attempts
    }

    /// Run the consumer forever under the hosting kernel.
    pub async fn run<K, T>(mut self, kernel: &K, trace: &SharedTrace<T>)
    where
        K: KernelInterface,
        T: GpioInterface,
    {
        kernel.set_task_tag(self.meta.tag);
        trace.with(|t| t.task_in(self.meta.tag));
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), self.meta.period_ticks);

        loop {
            self.forward().await;
            schedule.pace(kernel).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::MockKernel;
    use crate::platform::mock::MockSerial;
    use embassy_futures::block_on;

    #[test]
    fn forwards_current_message() {
        let slot = MessageSlot::new();
        slot.publish(config::TRANSMITTER_MESSAGE);

        let mut consumer = TransportConsumer::new(&slot, MockSerial::new(Default::default()));
        let attempts = block_on(consumer.forward());

        assert_eq!(attempts, 1);
        assert_eq!(consumer.serial().transmitted(), b"TRANSMITTER\n");
    }

    #[test]
    fn empty_slot_sends_nothing() {
        let slot = MessageSlot::new();
        let mut consumer = TransportConsumer::new(&slot, MockSerial::new(Default::default()));

        assert_eq!(block_on(consumer.forward()), 0);
        assert_eq!(consumer.serial().attempts(), 0);
    }

    #[test]
    fn busy_transport_retries_until_accepted() {
        let slot = MessageSlot::new();
        slot.publish(config::BUTTON_1_RISING);

        let mut serial = MockSerial::new(Default::default());
        serial.reject_next(3);

        let mut consumer = TransportConsumer::new(&slot, serial);
        let attempts = block_on(consumer.forward());

        // Three rejections then success: exactly N + 1 attempts
        assert_eq!(attempts, 4);
        assert_eq!(consumer.serial().transmitted(), b"Button 1 RISING\n");
    }

    #[test]
    fn retries_do_not_advance_the_wake_anchor() {
        let slot = MessageSlot::new();
        slot.publish(config::TRANSMITTER_MESSAGE);

        let mut serial = MockSerial::new(Default::default());
        serial.reject_next(5);
        let mut consumer = TransportConsumer::new(&slot, serial);

        let kernel = MockKernel::new();
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), 20);

        block_on(async {
            consumer.forward().await;
            schedule.pace(&kernel).await;
        });

        assert_eq!(consumer.serial().attempts(), 6);
        // One delay was requested, at the original period boundary
        assert_eq!(kernel.wake_targets().as_slice(), &[20]);
        assert_eq!(schedule.last_wake(), 20);
    }

    #[test]
    fn hard_fault_drops_the_message() {
        let slot = MessageSlot::new();
        slot.publish(config::TRANSMITTER_MESSAGE);

        let mut serial = MockSerial::new(Default::default());
        serial.fault_next(1);
        let mut consumer = TransportConsumer::new(&slot, serial);

        assert_eq!(block_on(consumer.forward()), 1);
        assert!(consumer.serial().transmitted().is_empty());
    }

    #[test]
    fn long_message_is_truncated_to_the_mtu() {
        // A static string longer than the 150 byte transport limit
        static LONG: &str = "0123456789012345678901234567890123456789\
                             0123456789012345678901234567890123456789\
                             0123456789012345678901234567890123456789\
                             0123456789012345678901234567890123456789";
        assert!(LONG.len() > TRANSPORT_MTU);

        let slot = MessageSlot::new();
        slot.publish(LONG);

        let mut consumer = TransportConsumer::new(&slot, MockSerial::new(Default::default()));
        block_on(consumer.forward());

        assert_eq!(consumer.serial().transmitted().len(), TRANSPORT_MTU);
    }
}
