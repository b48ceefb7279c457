//! Button input monitors
//!
//! Two periodic tasks each sample one digital input per period and publish a
//! fixed event string into the shared slot when the level changed since the
//! previous sample. Iterations without a change publish nothing.

use crate::core::config;
use crate::core::kernel::KernelInterface;
use crate::core::mailbox::MessageSlot;
use crate::core::sched::{PeriodicSchedule, TaskMetadata};
use crate::core::trace::SharedTrace;
use crate::platform::traits::GpioInterface;

/// Classified level transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rising,
    /// High to low
    Falling,
}

/// Transition detector over successive level samples.
///
/// The level before the first sample is assumed low, so a device that boots
/// already high reports one rising edge on its first sample.
#[derive(Debug, Default)]
pub struct EdgeDetector {
    last_level: bool,
}

impl EdgeDetector {
    /// Create a detector with the assumed boot-low state
    pub const fn new() -> Self {
        Self { last_level: false }
    }

    /// Feed one sample; returns the edge if the level changed.
    ///
    /// Each change is classified exactly once: repeated samples at the new
    /// level return `None`.
    pub fn update(&mut self, level: bool) -> Option<Edge> {
        if level == self.last_level {
            return None;
        }
        let edge = if self.last_level {
            Edge::Falling
        } else {
            Edge::Rising
        };
        self.last_level = level;
        Some(edge)
    }
}

/// Periodic input monitor for one button.
pub struct ButtonMonitor<'a, G: GpioInterface> {
    pin: G,
    slot: &'a MessageSlot,
    detector: EdgeDetector,
    meta: &'static TaskMetadata,
    rising: &'static str,
    falling: &'static str,
}

impl<'a, G: GpioInterface> ButtonMonitor<'a, G> {
    /// Create a monitor with explicit metadata and event strings
    pub fn new(
        pin: G,
        slot: &'a MessageSlot,
        meta: &'static TaskMetadata,
        rising: &'static str,
        falling: &'static str,
    ) -> Self {
        Self {
            pin,
            slot,
            detector: EdgeDetector::new(),
            meta,
            rising,
            falling,
        }
    }

    /// The standard button 1 monitor
    pub fn button_1(pin: G, slot: &'a MessageSlot) -> Self {
        Self::new(
            pin,
            slot,
            &config::BUTTON_1_META,
            config::BUTTON_1_RISING,
            config::BUTTON_1_FALLING,
        )
    }

    /// The standard button 2 monitor
    pub fn button_2(pin: G, slot: &'a MessageSlot) -> Self {
        Self::new(
            pin,
            slot,
            &config::BUTTON_2_META,
            config::BUTTON_2_RISING,
            config::BUTTON_2_FALLING,
        )
    }

    /// The monitored input pin
    pub fn pin(&self) -> &G {
        &self.pin
    }

    /// One unit of work: sample the pin and publish on a change.
    pub fn poll(&mut self) -> Option<Edge> {
        let edge = self.detector.update(self.pin.read());
        match edge {
            Some(Edge::Rising) => self.slot.publish(self.rising),
            Some(Edge::Falling) => self.slot.publish(self.falling),
            None => {}
        }
        edge
    }

    /// Run the monitor forever under the hosting kernel.
    pub async fn run<K, T>(mut self, kernel: &K, trace: &SharedTrace<T>)
    where
        K: KernelInterface,
        T: GpioInterface,
    {
        kernel.set_task_tag(self.meta.tag);
        trace.with(|t| t.task_in(self.meta.tag));
        let mut schedule = PeriodicSchedule::start(kernel.tick_count(), self.meta.period_ticks);

        loop {
            self.poll();
            schedule.pace(kernel).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockPin;

    #[test]
    fn detector_classifies_each_change_once() {
        let mut detector = EdgeDetector::new();

        assert_eq!(detector.update(false), None);
        assert_eq!(detector.update(true), Some(Edge::Rising));
        assert_eq!(detector.update(true), None);
        assert_eq!(detector.update(false), Some(Edge::Falling));
        assert_eq!(detector.update(false), None);
    }

    #[test]
    fn boot_high_device_reports_rising_on_first_sample() {
        let mut detector = EdgeDetector::new();
        assert_eq!(detector.update(true), Some(Edge::Rising));
    }

    #[test]
    fn scripted_levels_publish_one_message_per_change() {
        let slot = MessageSlot::new();
        let mut monitor = ButtonMonitor::button_1(MockPin::new_input(), &slot);

        // Scripted sequence: low low high high low
        let script = [false, false, true, true, false];
        let mut published = 0;
        for level in script {
            monitor.pin().set_level(level);
            if monitor.poll().is_some() {
                published += 1;
            }
        }

        assert_eq!(published, 2);
        assert_eq!(slot.current(), Some(config::BUTTON_1_FALLING));
    }

    #[test]
    fn rising_publishes_rising_message() {
        let slot = MessageSlot::new();
        let mut monitor = ButtonMonitor::button_2(MockPin::new_input(), &slot);

        monitor.pin().set_level(true);
        assert_eq!(monitor.poll(), Some(Edge::Rising));
        assert_eq!(slot.current(), Some(config::BUTTON_2_RISING));
    }

    #[test]
    fn unchanged_level_publishes_nothing() {
        let slot = MessageSlot::new();
        let mut monitor = ButtonMonitor::button_1(MockPin::new_input(), &slot);

        for _ in 0..5 {
            assert_eq!(monitor.poll(), None);
        }
        assert_eq!(slot.current(), None);
    }
}
