//! Integrator-based debouncing for noisy GPIO buttons.
//!
//! Each [`Button`] runs a saturating up/down counter over its raw samples.
//! The debounced level only flips once the counter reaches a rail, which
//! gives the filter hysteresis against contact chatter. Transitions are
//! latched on the button until consumed and, through the [`Debouncer`],
//! delivered either into a bounded [`EventQueue`] or straight to a callback.
//!
//! # Architecture
//!
//! ```text
//! tick (timer ISR / main loop)
//!         ↓
//! Debouncer::update ── PinReader::read(pin) ──→ platform GPIO
//!         ↓
//! Button::step(sample) → Option<Edge>
//!         ↓
//! EventSink::emit(Event) → EventQueue<N> | Callback<F>
//! ```
//!
//! The crate never schedules anything. Call [`Debouncer::update`] at a
//! roughly constant rate; the button threshold is measured in those calls.
//!
//! # Features
//!
//! - `std`: Expose the [`mocks`] module outside of tests
//! - `defmt`: Enable defmt logging and `defmt::Format` derives
//! - `tracing`: Log through `tracing` (desktop / simulator builds)
//!
//! # Example
//!
//! ```
//! use debounce::{Button, Debouncer, Edge};
//!
//! let mut buttons = [Button::new(4, 3), Button::new(23, 1)];
//! let mut debouncer = Debouncer::new(&mut buttons, |_pin: u8| false).unwrap();
//!
//! debouncer.update();
//! assert_eq!(debouncer.pop_event(), None);
//! assert!(!debouncer.read(0));
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_code)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)] // accessors — callers decide

#[macro_use]
mod fmt;

pub mod config;
pub mod error;
pub mod hal;
pub mod integrator;
pub mod queue;
pub mod registry;
pub mod shared;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

pub use config::{ButtonBuilder, DEFAULT_EVENT_QUEUE_CAPACITY, DEFAULT_THRESHOLD};
pub use error::ConfigError;
pub use hal::{ActiveLevel, InputPins};
pub use integrator::{Button, ButtonState, Edge, PinId};
pub use queue::{Event, EventQueue};
pub use registry::{Callback, Debouncer, EventSink, PinReader};
pub use shared::SharedDebouncer;
