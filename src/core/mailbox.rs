//! Shared message slot
//!
//! Producer tasks publish the latest human-readable event string into a
//! single slot; the consumer task drains it once per period. Delivery is
//! last-write-wins: there is no versioning and no backpressure, so a reader
//! may re-observe a message it already forwarded or miss one that was
//! overwritten between its reads. Both producers and the consumer accept
//! that trade-off; what the slot does guarantee is that a read never
//! observes a torn value.

use core::cell::Cell;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Single-slot last-write-wins mailbox of static message strings.
///
/// The cell is one reference-sized value behind a critical-section mutex, so
/// publishing from any task or interrupt context is safe and a concurrent
/// read returns either the old or the new reference, never a mix.
///
/// # Example
///
/// ```
/// use sched_trace::core::mailbox::MessageSlot;
///
/// static SLOT: MessageSlot = MessageSlot::new();
///
/// SLOT.publish("Button 1 RISING\n");
/// SLOT.publish("TRANSMITTER\n");
/// assert_eq!(SLOT.current(), Some("TRANSMITTER\n"));
/// ```
pub struct MessageSlot {
    latest: Mutex<CriticalSectionRawMutex, Cell<Option<&'static str>>>,
}

impl MessageSlot {
    /// Create an empty slot
    pub const fn new() -> Self {
        Self {
            latest: Mutex::new(Cell::new(None)),
        }
    }

    /// Publish a message, replacing whatever was there
    pub fn publish(&self, message: &'static str) {
        self.latest.lock(|cell| cell.set(Some(message)));
    }

    /// The most recently published message, if any was ever published
    pub fn current(&self) -> Option<&'static str> {
        self.latest.lock(|cell| cell.get())
    }
}

impl Default for MessageSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let slot = MessageSlot::new();
        assert_eq!(slot.current(), None);
    }

    #[test]
    fn last_write_wins() {
        let slot = MessageSlot::new();
        slot.publish("first\n");
        slot.publish("second\n");
        assert_eq!(slot.current(), Some("second\n"));
    }

    #[test]
    fn reads_do_not_drain() {
        let slot = MessageSlot::new();
        slot.publish("sticky\n");
        assert_eq!(slot.current(), Some("sticky\n"));
        // A second read re-observes the same message
        assert_eq!(slot.current(), Some("sticky\n"));
    }

    #[test]
    fn concurrent_publishes_never_tear() {
        static SLOT: MessageSlot = MessageSlot::new();
        const A: &str = "producer A\n";
        const B: &str = "producer B\n";

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for _ in 0..1000 {
                    SLOT.publish(A);
                }
            });
            scope.spawn(|| {
                for _ in 0..1000 {
                    SLOT.publish(B);
                }
            });
            for _ in 0..1000 {
                if let Some(seen) = SLOT.current() {
                    assert!(core::ptr::eq(seen, A) || core::ptr::eq(seen, B));
                }
            }
        });
    }
}
