//! Mock collaborators for testing
//!
//! Scripted pin levels and a recording event sink, for unit tests,
//! integration tests and host-side simulations.

#![cfg(any(test, feature = "std"))]

use crate::integrator::PinId;
use crate::queue::Event;
use crate::registry::{EventSink, PinReader};

/// Pin reader replaying a scripted sample sequence per pin.
///
/// Pin id `n` reads from script `n`. Once a script is exhausted the pin
/// holds its last level. Pins without a script read low.
pub struct ScriptedPins<const PINS: usize, const DEPTH: usize> {
    scripts: [heapless::Deque<bool, DEPTH>; PINS],
    last: [bool; PINS],
    reads: usize,
}

impl<const PINS: usize, const DEPTH: usize> ScriptedPins<PINS, DEPTH> {
    /// Create mock pins, all low with empty scripts.
    pub fn new() -> Self {
        Self {
            scripts: core::array::from_fn(|_| heapless::Deque::new()),
            last: [false; PINS],
            reads: 0,
        }
    }

    /// Append samples to the script of `pin`.
    ///
    /// Returns the first sample that did not fit.
    pub fn script(&mut self, pin: PinId, samples: &[bool]) -> Result<(), bool> {
        let Some(script) = self.scripts.get_mut(usize::from(pin)) else {
            return samples.first().map_or(Ok(()), |&s| Err(s));
        };
        for &sample in samples {
            script.push_back(sample)?;
        }
        Ok(())
    }

    /// Force the level `pin` reads once its script runs out.
    pub fn hold(&mut self, pin: PinId, level: bool) {
        if let Some(slot) = self.last.get_mut(usize::from(pin)) {
            *slot = level;
        }
    }

    /// Samples still queued for `pin`.
    pub fn remaining(&self, pin: PinId) -> usize {
        self.scripts
            .get(usize::from(pin))
            .map_or(0, |script| script.len())
    }

    /// Total number of reads served.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl<const PINS: usize, const DEPTH: usize> Default for ScriptedPins<PINS, DEPTH> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const PINS: usize, const DEPTH: usize> PinReader for ScriptedPins<PINS, DEPTH> {
    fn read(&mut self, pin: PinId) -> bool {
        self.reads = self.reads.saturating_add(1);
        let index = usize::from(pin);
        let (Some(script), Some(last)) = (self.scripts.get_mut(index), self.last.get_mut(index))
        else {
            return false;
        };
        if let Some(sample) = script.pop_front() {
            *last = sample;
        }
        *last
    }
}

/// Event sink recording every event it receives, up to `N`.
pub struct RecordingSink<const N: usize> {
    events: heapless::Vec<Event, N>,
    overflowed: usize,
}

impl<const N: usize> RecordingSink<N> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            events: heapless::Vec::new(),
            overflowed: 0,
        }
    }

    /// Events recorded so far, in delivery order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Number of events that arrived after the recorder was full.
    pub fn overflowed(&self) -> usize {
        self.overflowed
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
        self.overflowed = 0;
    }
}

impl<const N: usize> Default for RecordingSink<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventSink for RecordingSink<N> {
    fn emit(&mut self, event: Event) {
        if self.events.push(event).is_err() {
            self.overflowed = self.overflowed.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingSink, ScriptedPins};
    use crate::integrator::Edge;
    use crate::queue::Event;
    use crate::registry::{EventSink, PinReader};

    #[test]
    fn test_script_replays_then_holds() {
        let mut pins: ScriptedPins<2, 4> = ScriptedPins::new();
        assert_eq!(pins.script(1, &[true, false, true]), Ok(()));
        assert_eq!(pins.remaining(1), 3);
        assert!(pins.read(1));
        assert!(!pins.read(1));
        assert!(pins.read(1));
        assert!(pins.read(1));
        assert!(!pins.read(0));
        assert_eq!(pins.reads(), 5);
    }

    #[test]
    fn test_script_overflow_reports_sample() {
        let mut pins: ScriptedPins<1, 2> = ScriptedPins::new();
        assert_eq!(pins.script(0, &[true, true, false]), Err(false));
        assert_eq!(pins.script(5, &[true]), Err(true));
    }

    #[test]
    fn test_hold_sets_idle_level() {
        let mut pins: ScriptedPins<1, 1> = ScriptedPins::new();
        pins.hold(0, true);
        assert!(pins.read(0));
        assert!(!pins.read(3));
    }

    #[test]
    fn test_recording_sink_counts_overflow() {
        let mut sink: RecordingSink<1> = RecordingSink::new();
        let ev = Event {
            index: 0,
            pin: 2,
            edge: Edge::Falling,
        };
        sink.emit(ev);
        sink.emit(ev);
        assert_eq!(sink.events(), &[ev]);
        assert_eq!(sink.overflowed(), 1);
        sink.clear();
        assert!(sink.events().is_empty());
    }
}
