//! Const-generic, stack-allocated event queue.
//!
//! `EventQueue<N>` holds up to `N` [`Event`]s without heap allocation. It is
//! written by [`Debouncer::update`](crate::Debouncer::update) and drained by
//! [`Debouncer::pop_event`](crate::Debouncer::pop_event).
//!
//! # Overflow
//!
//! The queue never grows and never blocks. Pushing into a full queue evicts
//! the oldest unread event so the newest `N` are always retained, in order.
//!
//! # Constraints
//!
//! - `N` must be at least 1. A zero-capacity queue is still safe to use:
//!   every push is handed straight back as evicted.
//! - This type is not interrupt-safe. Share it between an ISR and the main
//!   loop through [`SharedDebouncer`](crate::SharedDebouncer).

use crate::integrator::{Edge, PinId};

/// A debounced transition on one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// Registration index of the button within its debouncer.
    pub index: usize,
    /// Pin of the button.
    pub pin: PinId,
    /// Direction of the transition.
    pub edge: Edge,
}

/// A fixed-capacity FIFO of [`Event`]s with drop-oldest overflow.
pub struct EventQueue<const N: usize> {
    buf: [Option<Event>; N],
    /// Index of the oldest event.
    front: usize,
    /// Index of the next free slot.
    back: usize,
    /// Number of events currently held.
    len: usize,
}

impl<const N: usize> EventQueue<N> {
    /// Create a new, empty queue.
    ///
    /// This function is `const` so that queues may be stored in `static`
    /// variables without a runtime initialiser.
    pub const fn new() -> Self {
        Self {
            buf: [None; N],
            front: 0,
            back: 0,
            len: 0,
        }
    }

    const fn advance(index: usize) -> usize {
        let next = index.wrapping_add(1);
        if next >= N {
            0
        } else {
            next
        }
    }

    /// Append `event`, evicting the oldest event if the queue is full.
    ///
    /// Returns the evicted event, if any.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        let Some(slot) = self.buf.get_mut(self.back) else {
            return Some(event);
        };
        let evicted = if self.len == N {
            // back == front when full: the slot being overwritten is the oldest.
            self.front = Self::advance(self.front);
            slot.take()
        } else {
            self.len = self.len.saturating_add(1);
            None
        };
        *slot = Some(event);
        self.back = Self::advance(self.back);
        evicted
    }

    /// Remove and return the oldest event, or `None` when empty.
    pub fn pop(&mut self) -> Option<Event> {
        if self.len == 0 {
            return None;
        }
        let event = self.buf.get_mut(self.front).and_then(Option::take);
        self.front = Self::advance(self.front);
        self.len = self.len.saturating_sub(1);
        event
    }

    /// Oldest event without removing it.
    pub fn peek(&self) -> Option<&Event> {
        if self.len == 0 {
            return None;
        }
        self.buf.get(self.front).and_then(Option::as_ref)
    }

    /// Drop every queued event.
    pub fn clear(&mut self) {
        self.buf = [None; N];
        self.front = 0;
        self.back = 0;
        self.len = 0;
    }

    /// Number of events currently queued.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Maximum number of events the queue can hold.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// `true` when no events are queued.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` when the next push will evict.
    pub fn is_full(&self) -> bool {
        self.len == N
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
