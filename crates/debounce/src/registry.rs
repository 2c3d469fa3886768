//! Button registry and tick dispatcher.
//!
//! A [`Debouncer`] borrows the caller's button table, owns the platform
//! [`PinReader`] and an [`EventSink`], and drives every button once per
//! [`Debouncer::update`].
//!
//! Two delivery modes share the same update loop:
//!
//! | Constructor                    | Sink                | Delivery            |
//! |--------------------------------|---------------------|---------------------|
//! | [`Debouncer::new`]             | [`EventQueue<8>`]   | [`Debouncer::pop_event`] |
//! | [`Debouncer::with_callback`]   | [`Callback<F>`]     | synchronous call    |
//! | [`Debouncer::with_sink`]       | any [`EventSink`]   | sink-defined        |
//!
//! Buttons are processed in registration order, so events of one tick are
//! delivered in that order too.

use crate::config::DEFAULT_EVENT_QUEUE_CAPACITY;
use crate::error::ConfigError;
use crate::integrator::{Button, PinId};
use crate::queue::{Event, EventQueue};

// ---------------------------------------------------------------------------
// Injected capabilities
// ---------------------------------------------------------------------------

/// Platform GPIO query.
///
/// Must return promptly and have no side effects the debouncer could
/// observe. Called exactly once per button per [`Debouncer::update`], plus
/// once per button at construction for seeding.
pub trait PinReader {
    /// Raw level of `pin`.
    fn read(&mut self, pin: PinId) -> bool;
}

impl<F> PinReader for F
where
    F: FnMut(PinId) -> bool,
{
    fn read(&mut self, pin: PinId) -> bool {
        self(pin)
    }
}

/// Destination for debounced events.
///
/// `emit` runs synchronously inside [`Debouncer::update`]; a slow sink
/// delays the remaining buttons of the same tick.
pub trait EventSink {
    /// Deliver one event.
    fn emit(&mut self, event: Event);
}

impl<const N: usize> EventSink for EventQueue<N> {
    fn emit(&mut self, event: Event) {
        if let Some(dropped) = self.push(event) {
            warn!(
                "event queue full, dropped {} edge on pin {}",
                dropped.edge.as_str(),
                dropped.pin
            );
        }
    }
}

impl<S> EventSink for &mut S
where
    S: EventSink + ?Sized,
{
    fn emit(&mut self, event: Event) {
        (**self).emit(event);
    }
}

/// Callback-mode sink wrapping any `FnMut(Event)`.
pub struct Callback<F>(pub F);

impl<F> EventSink for Callback<F>
where
    F: FnMut(Event),
{
    fn emit(&mut self, event: Event) {
        (self.0)(event);
    }
}

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// Debouncer over a caller-owned button table.
///
/// The button slice must outlive the debouncer; no global state is kept, so
/// any number of independent instances may exist.
pub struct Debouncer<'a, R, S = EventQueue<DEFAULT_EVENT_QUEUE_CAPACITY>> {
    buttons: &'a mut [Button],
    reader: R,
    sink: S,
}

impl<'a, R> Debouncer<'a, R, EventQueue<DEFAULT_EVENT_QUEUE_CAPACITY>>
where
    R: PinReader,
{
    /// Create a queue-mode debouncer with the default capacity of
    /// [`DEFAULT_EVENT_QUEUE_CAPACITY`] events and seed every button.
    ///
    /// # Errors
    ///
    /// See [`Debouncer::with_sink`].
    pub fn new(buttons: &'a mut [Button], reader: R) -> Result<Self, ConfigError> {
        Self::with_sink(buttons, reader, EventQueue::new())
    }
}

impl<'a, R, F> Debouncer<'a, R, Callback<F>>
where
    R: PinReader,
    F: FnMut(Event),
{
    /// Create a callback-mode debouncer and seed every button.
    ///
    /// `callback` is invoked from inside [`Debouncer::update`], once per
    /// detected edge, before the next button is read.
    ///
    /// # Errors
    ///
    /// See [`Debouncer::with_sink`].
    pub fn with_callback(
        buttons: &'a mut [Button],
        reader: R,
        callback: F,
    ) -> Result<Self, ConfigError> {
        Self::with_sink(buttons, reader, Callback(callback))
    }
}

impl<'a, R, S> Debouncer<'a, R, S>
where
    R: PinReader,
    S: EventSink,
{
    /// Create a debouncer delivering into `sink` and seed every button with
    /// one read.
    ///
    /// Seeding never produces events.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NoButtons`] if `buttons` is empty.
    /// - [`ConfigError::ZeroThreshold`] for the first button with a zero
    ///   threshold. No button is seeded in that case.
    pub fn with_sink(
        buttons: &'a mut [Button],
        mut reader: R,
        sink: S,
    ) -> Result<Self, ConfigError> {
        if buttons.is_empty() {
            return Err(ConfigError::NoButtons);
        }
        if let Some((index, btn)) = buttons
            .iter()
            .enumerate()
            .find(|(_, btn)| btn.threshold() == 0)
        {
            return Err(ConfigError::ZeroThreshold {
                index,
                pin: btn.pin(),
            });
        }

        for btn in buttons.iter_mut() {
            let sample = reader.read(btn.pin());
            btn.seed(sample);
        }
        debug!("debouncer seeded {} buttons", buttons.len());

        Ok(Self {
            buttons,
            reader,
            sink,
        })
    }

    /// Run one debounce tick over every button, in registration order.
    pub fn update(&mut self) {
        for (index, btn) in self.buttons.iter_mut().enumerate() {
            let pin = btn.pin();
            let sample = self.reader.read(pin);
            if let Some(edge) = btn.step(sample) {
                trace!("pin {}: {} edge", pin, edge.as_str());
                self.sink.emit(Event { index, pin, edge });
            }
        }
    }

    /// Number of registered buttons.
    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    /// Always `false`: construction rejects an empty table.
    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    /// Every registered button, in registration order.
    pub fn buttons(&self) -> &[Button] {
        &*self.buttons
    }

    /// Button at registration `index`.
    pub fn button(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    /// Mutable button at registration `index`, for latch consumption.
    pub fn button_mut(&mut self, index: usize) -> Option<&mut Button> {
        self.buttons.get_mut(index)
    }

    /// Registration index of the first button on `pin`.
    pub fn index_of(&self, pin: PinId) -> Option<usize> {
        self.buttons.iter().position(|btn| btn.pin() == pin)
    }

    /// Debounced level of button `index`; `false` if out of range.
    pub fn read(&self, index: usize) -> bool {
        self.button(index).is_some_and(Button::read)
    }

    /// Consume the rising latch of button `index`; `false` if out of range.
    pub fn consume_rising(&mut self, index: usize) -> bool {
        self.button_mut(index).is_some_and(Button::consume_rising)
    }

    /// Consume the falling latch of button `index`; `false` if out of range.
    pub fn consume_falling(&mut self, index: usize) -> bool {
        self.button_mut(index).is_some_and(Button::consume_falling)
    }

    /// Consume both latches of button `index`; `false` if out of range.
    pub fn consume_changed(&mut self, index: usize) -> bool {
        self.button_mut(index).is_some_and(Button::consume_changed)
    }

    /// The event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The event sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear down, returning the reader and sink. The buttons keep their
    /// state.
    pub fn release(self) -> (R, S) {
        (self.reader, self.sink)
    }
}

impl<'a, R, const N: usize> Debouncer<'a, R, EventQueue<N>>
where
    R: PinReader,
{
    /// Oldest pending event, or `None` when the queue is empty.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.sink.pop()
    }

    /// Number of events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.sink.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)] // readable test assertions
mod tests {
    use super::{Debouncer, EventSink};
    use crate::error::ConfigError;
    use crate::integrator::{Button, Edge};
    use crate::queue::{Event, EventQueue};
    use core::cell::Cell;

    #[test]
    fn test_empty_table_rejected() {
        let mut buttons: [Button; 0] = [];
        let result = Debouncer::new(&mut buttons, |_: u8| false);
        assert!(matches!(result, Err(ConfigError::NoButtons)));
    }

    #[test]
    fn test_zero_threshold_rejected_with_index() {
        let mut buttons = [Button::new(1, 2), Button::new(9, 0)];
        let result = Debouncer::new(&mut buttons, |_: u8| false);
        assert!(matches!(
            result,
            Err(ConfigError::ZeroThreshold { index: 1, pin: 9 })
        ));
    }

    #[test]
    fn test_seeding_reads_each_pin_once() {
        let reads = Cell::new(0u32);
        let mut buttons = [Button::new(1, 3), Button::new(2, 3)];
        let db = Debouncer::new(&mut buttons, |pin: u8| {
            reads.set(reads.get() + 1);
            pin == 2
        })
        .unwrap();
        assert_eq!(reads.get(), 2);
        assert!(!db.read(0));
        assert!(db.read(1));
        assert_eq!(db.button(1).map(Button::counter), Some(3));
        assert_eq!(db.pending_events(), 0);
    }

    #[test]
    fn test_update_queues_rising_edge() {
        let level = Cell::new(false);
        let mut buttons = [Button::new(5, 2)];
        let mut db = Debouncer::new(&mut buttons, |_: u8| level.get()).unwrap();

        level.set(true);
        db.update();
        assert_eq!(db.pop_event(), None);
        db.update();
        assert_eq!(
            db.pop_event(),
            Some(Event {
                index: 0,
                pin: 5,
                edge: Edge::Rising
            })
        );
        assert!(db.read(0));
        assert!(db.consume_rising(0));
        assert!(!db.consume_rising(0));
    }

    #[test]
    fn test_callback_mode_delivers_in_registration_order() {
        let mut seen: heapless::Vec<Event, 8> = heapless::Vec::new();
        let high = Cell::new(false);
        let mut buttons = [Button::new(3, 1), Button::new(1, 1), Button::new(2, 1)];
        {
            let mut db = Debouncer::with_callback(
                &mut buttons,
                |_: u8| high.get(),
                |ev: Event| seen.push(ev).unwrap(),
            )
            .unwrap();
            high.set(true);
            db.update();
        }
        let pins: heapless::Vec<u8, 8> = seen.iter().map(|ev| ev.pin).collect();
        assert_eq!(pins.as_slice(), &[3, 1, 2]);
        assert!(seen.iter().all(|ev| ev.edge == Edge::Rising));
        // Callback mode still latches.
        assert!(buttons.iter_mut().all(Button::consume_rising));
    }

    #[test]
    fn test_out_of_range_accessors_are_false() {
        let mut buttons = [Button::new(0, 1)];
        let mut db = Debouncer::new(&mut buttons, |_: u8| true).unwrap();
        assert!(!db.read(4));
        assert!(!db.consume_rising(4));
        assert!(!db.consume_falling(4));
        assert!(!db.consume_changed(4));
        assert!(db.button(4).is_none());
    }

    #[test]
    fn test_index_of_finds_pin() {
        let mut buttons = [Button::new(10, 1), Button::new(20, 1)];
        let db = Debouncer::new(&mut buttons, |_: u8| false).unwrap();
        assert_eq!(db.index_of(20), Some(1));
        assert_eq!(db.index_of(30), None);
        assert_eq!(db.len(), 2);
        assert!(!db.is_empty());
    }

    #[test]
    fn test_custom_capacity_sink() {
        let level = Cell::new(false);
        let mut buttons = [Button::new(0, 1)];
        let mut db =
            Debouncer::with_sink(&mut buttons, |_: u8| level.get(), EventQueue::<2>::new()).unwrap();
        for _ in 0..3 {
            level.set(!level.get());
            db.update();
        }
        // Rising, falling, rising: the first rising was evicted.
        assert_eq!(db.sink().capacity(), 2);
        assert_eq!(db.pop_event().map(|e| e.edge), Some(Edge::Falling));
        assert_eq!(db.pop_event().map(|e| e.edge), Some(Edge::Rising));
        assert_eq!(db.pop_event(), None);
    }

    #[test]
    fn test_release_returns_sink() {
        let mut buttons = [Button::new(0, 1)];
        let mut db = Debouncer::with_sink(&mut buttons, |_: u8| false, EventQueue::<4>::new()).unwrap();
        db.sink_mut().emit(Event {
            index: 0,
            pin: 0,
            edge: Edge::Falling,
        });
        let (_, mut queue) = db.release();
        assert_eq!(queue.pop().map(|e| e.edge), Some(Edge::Falling));
    }
}
