//! Interrupt-safe wrapper around a [`Debouncer`].
//!
//! [`Debouncer::update`] and the latch-consuming accessors are plain
//! read-modify-write operations. When `update` runs from a timer interrupt
//! and the main loop consumes latches or pops events, both sides must be
//! excluded from each other. [`SharedDebouncer`] does that with a
//! `critical_section::Mutex`: every method runs inside
//! `critical_section::with`, which on single-core Cortex-M masks interrupts
//! for the duration of the call.
//!
//! All methods are short and bounded (`update` is O(buttons), everything
//! else O(1)), so the critical sections stay short.
//!
//! # Usage
//!
//! ```no_run
//! use debounce::{Button, Debouncer, EventQueue, SharedDebouncer};
//! use static_cell::StaticCell;
//!
//! type Reader = fn(u8) -> bool;
//! type Shared = SharedDebouncer<'static, Reader, EventQueue<8>>;
//!
//! static BUTTONS: StaticCell<[Button; 2]> = StaticCell::new();
//! static DEBOUNCER: StaticCell<Shared> = StaticCell::new();
//!
//! fn read_gpio(_pin: u8) -> bool { false }
//!
//! // Runs from the timer interrupt.
//! fn on_timer(shared: &'static Shared) {
//!     shared.update();
//! }
//!
//! let buttons = BUTTONS.init([Button::new(4, 20), Button::new(23, 1)]);
//! let debouncer = Debouncer::new(buttons, read_gpio as Reader).unwrap();
//! let shared: &'static Shared = DEBOUNCER.init(SharedDebouncer::new(debouncer));
//!
//! on_timer(shared);
//! // main loop
//! while let Some(ev) = shared.pop_event() {
//!     let _ = (ev.pin, ev.edge);
//! }
//! ```

use core::cell::RefCell;

use critical_section::Mutex;

use crate::integrator::Button;
use crate::queue::{Event, EventQueue};
use crate::registry::{Debouncer, EventSink, PinReader};

/// A [`Debouncer`] that may be shared between interrupt and thread context.
pub struct SharedDebouncer<'a, R, S> {
    inner: Mutex<RefCell<Debouncer<'a, R, S>>>,
}

impl<'a, R, S> SharedDebouncer<'a, R, S>
where
    R: PinReader,
    S: EventSink,
{
    /// Wrap an initialised debouncer.
    pub const fn new(debouncer: Debouncer<'a, R, S>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(debouncer)),
        }
    }

    /// Run `f` with exclusive access to the debouncer inside a critical
    /// section.
    ///
    /// Returns `None` if called re-entrantly from within another `with`
    /// on the same instance (for instance from an event callback).
    pub fn with<T>(&self, f: impl FnOnce(&mut Debouncer<'a, R, S>) -> T) -> Option<T> {
        critical_section::with(|cs| {
            let mut guard = self.inner.borrow(cs).try_borrow_mut().ok()?;
            Some(f(&mut guard))
        })
    }

    /// Run one debounce tick. A re-entrant call is skipped.
    pub fn update(&self) {
        if self.with(Debouncer::update).is_none() {
            warn!("re-entrant debouncer update skipped");
        }
    }

    /// Debounced level of button `index`.
    pub fn read(&self, index: usize) -> bool {
        self.with(|db| db.read(index)).unwrap_or(false)
    }

    /// Consume the rising latch of button `index`.
    pub fn consume_rising(&self, index: usize) -> bool {
        self.with(|db| db.consume_rising(index)).unwrap_or(false)
    }

    /// Consume the falling latch of button `index`.
    pub fn consume_falling(&self, index: usize) -> bool {
        self.with(|db| db.consume_falling(index)).unwrap_or(false)
    }

    /// Consume both latches of button `index`.
    pub fn consume_changed(&self, index: usize) -> bool {
        self.with(|db| db.consume_changed(index)).unwrap_or(false)
    }

    /// Copy of button `index`.
    pub fn button(&self, index: usize) -> Option<Button> {
        self.with(|db| db.button(index).cloned()).flatten()
    }

    /// Unwrap the debouncer.
    pub fn into_inner(self) -> Debouncer<'a, R, S> {
        self.inner.into_inner().into_inner()
    }
}

impl<R, const N: usize> SharedDebouncer<'_, R, EventQueue<N>>
where
    R: PinReader,
{
    /// Oldest pending event, or `None` when the queue is empty.
    pub fn pop_event(&self) -> Option<Event> {
        self.with(Debouncer::pop_event).flatten()
    }
}
