//! Per-button integrator.
//!
//! The integrator is a saturating up/down counter fed one raw sample per
//! tick. A high sample moves the counter toward `threshold`, a low sample
//! toward zero. The debounced level only changes when the counter sits on a
//! rail, so a chattering contact has to settle for `threshold` consecutive
//! ticks before anything is reported.
//!
//! Edges are reported on the tick the counter *reaches* the rail. Further
//! samples at the same rail keep the counter pinned and emit nothing.
//!
//! ```text
//! samples  T  T  T  T  F  F  F        (threshold = 3, seeded low)
//! counter  1  2  3  3  2  1  0
//! level    0  0  1  1  1  1  0
//! edge           ↑              ↓
//! ```

use crate::error::ConfigError;

/// Opaque pin identifier handed to the platform read function.
pub type PinId = u8;

/// Debounced transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Debounced level went from low to high.
    Rising,
    /// Debounced level went from high to low.
    Falling,
}

impl Edge {
    /// Short name for log output.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
        }
    }
}

/// Debounced level plus the two edge latches.
///
/// `level` is owned by the integrator. The latches are set by the
/// integrator and cleared only by the consumer through
/// [`Button::consume_rising`], [`Button::consume_falling`] and
/// [`Button::consume_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    /// Current debounced level.
    pub level: bool,
    /// Set on a rising edge, held until consumed.
    pub rising: bool,
    /// Set on a falling edge, held until consumed.
    pub falling: bool,
}

/// One physical input.
///
/// Create buttons with [`Button::new`] (or [`Button::try_new`] /
/// [`ButtonBuilder`](crate::ButtonBuilder) for validated construction),
/// store them wherever the application likes, and hand the slice to a
/// [`Debouncer`](crate::Debouncer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pin: PinId,
    threshold: u8,
    counter: u8,
    state: ButtonState,
}

impl Button {
    /// Create an unseeded button.
    ///
    /// `threshold` is the number of consecutive consistent samples required
    /// to flip the debounced level; `1` disables debouncing. A zero
    /// threshold is rejected by the [`Debouncer`](crate::Debouncer) and by
    /// [`Button::try_new`]; if it reaches [`Button::step`] regardless it
    /// behaves exactly like `1`.
    ///
    /// This is `const` so button tables can live in `static` storage.
    pub const fn new(pin: PinId, threshold: u8) -> Self {
        Self {
            pin,
            threshold,
            counter: 0,
            state: ButtonState {
                level: false,
                rising: false,
                falling: false,
            },
        }
    }

    /// Create an unseeded button, rejecting a zero threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroThreshold`] if `threshold == 0`. The
    /// reported index is `0` since the button is not registered yet.
    pub const fn try_new(pin: PinId, threshold: u8) -> Result<Self, ConfigError> {
        if threshold == 0 {
            Err(ConfigError::ZeroThreshold { index: 0, pin })
        } else {
            Ok(Self::new(pin, threshold))
        }
    }

    /// Pin identifier passed to the read function.
    pub const fn pin(&self) -> PinId {
        self.pin
    }

    /// Configured threshold.
    pub const fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Integrator counter, always within `0..=threshold`.
    pub const fn counter(&self) -> u8 {
        self.counter
    }

    /// Snapshot of the level and latch flags.
    pub const fn state(&self) -> ButtonState {
        self.state
    }

    /// Seed the integrator from a first sample.
    ///
    /// A button that starts high is already saturated, so it does not have
    /// to re-confirm its level. Both latches are cleared; no edge is
    /// produced.
    pub fn seed(&mut self, sample: bool) {
        self.counter = if sample { self.threshold } else { 0 };
        self.state = ButtonState {
            level: sample,
            rising: false,
            falling: false,
        };
    }

    /// Feed one raw sample and return the edge it completed, if any.
    pub fn step(&mut self, sample: bool) -> Option<Edge> {
        if sample {
            if self.counter < self.threshold {
                self.counter = self.counter.saturating_add(1);
            }
            if self.counter >= self.threshold && !self.state.level {
                self.state.level = true;
                self.state.rising = true;
                return Some(Edge::Rising);
            }
        } else {
            self.counter = self.counter.saturating_sub(1);
            if self.counter == 0 && self.state.level {
                self.state.level = false;
                self.state.falling = true;
                return Some(Edge::Falling);
            }
        }
        None
    }

    /// Debounced level as of the last [`Button::step`].
    pub const fn read(&self) -> bool {
        self.state.level
    }

    /// Return `true` and clear the rising latch if it was set.
    pub fn consume_rising(&mut self) -> bool {
        core::mem::take(&mut self.state.rising)
    }

    /// Return `true` and clear the falling latch if it was set.
    pub fn consume_falling(&mut self) -> bool {
        core::mem::take(&mut self.state.falling)
    }

    /// Clear both latches, returning `true` if either was set.
    pub fn consume_changed(&mut self) -> bool {
        let rising = self.consume_rising();
        let falling = self.consume_falling();
        rising || falling
    }
}

#[cfg(test)]
mod tests {
    use super::{Button, ButtonState, Edge};

    fn seeded(threshold: u8, sample: bool) -> Button {
        let mut btn = Button::new(7, threshold);
        btn.seed(sample);
        btn
    }

    #[test]
    fn test_seed_low_starts_at_zero() {
        let btn = seeded(5, false);
        assert_eq!(btn.counter(), 0);
        assert!(!btn.read());
        assert_eq!(btn.state(), ButtonState::default());
    }

    #[test]
    fn test_seed_high_starts_saturated() {
        let mut btn = seeded(5, true);
        assert_eq!(btn.counter(), 5);
        assert!(btn.read());
        // Already confirmed: a further high sample emits nothing.
        assert_eq!(btn.step(true), None);
        assert!(!btn.consume_rising());
    }

    #[test]
    fn test_seed_clears_latches() {
        let mut btn = seeded(1, false);
        assert_eq!(btn.step(true), Some(Edge::Rising));
        btn.seed(true);
        assert!(!btn.consume_rising());
        assert!(!btn.consume_falling());
    }

    #[test]
    fn test_threshold_three_sequence() {
        let mut btn = seeded(3, false);
        // (sample, counter, level, edge) after each tick
        let expected = [
            (true, 1, false, None),
            (true, 2, false, None),
            (true, 3, true, Some(Edge::Rising)),
            (true, 3, true, None),
            (false, 2, true, None),
            (false, 1, true, None),
            (false, 0, false, Some(Edge::Falling)),
        ];

        for (tick, (sample, counter, level, edge)) in expected.into_iter().enumerate() {
            assert_eq!(btn.step(sample), edge, "edge at tick {}", tick);
            assert_eq!(btn.counter(), counter, "counter at tick {}", tick);
            assert_eq!(btn.read(), level, "level at tick {}", tick);
            if tick == 2 {
                assert!(btn.state().rising);
            }
        }
        assert!(btn.consume_rising());
        assert!(btn.consume_falling());
    }

    #[test]
    fn test_threshold_one_flips_every_sample() {
        let mut btn = seeded(1, false);
        assert_eq!(btn.step(true), Some(Edge::Rising));
        assert_eq!(btn.step(false), Some(Edge::Falling));
        assert_eq!(btn.step(true), Some(Edge::Rising));
        assert_eq!(btn.step(true), None);
    }

    #[test]
    fn test_zero_threshold_behaves_like_one() {
        let mut btn = seeded(0, false);
        assert_eq!(btn.step(true), Some(Edge::Rising));
        assert_eq!(btn.counter(), 0);
        assert_eq!(btn.step(false), Some(Edge::Falling));
        assert_eq!(btn.step(false), None);
    }

    #[test]
    fn test_chatter_is_rejected() {
        let mut btn = seeded(4, false);
        for _ in 0..10 {
            assert_eq!(btn.step(true), None);
            assert_eq!(btn.step(false), None);
        }
        assert!(!btn.read());
        assert!(!btn.consume_changed());
    }

    #[test]
    fn test_consume_is_one_shot() {
        let mut btn = seeded(2, false);
        btn.step(true);
        btn.step(true);
        assert!(btn.consume_rising());
        assert!(!btn.consume_rising());
        assert!(!btn.consume_falling());
    }

    #[test]
    fn test_consume_changed_clears_both() {
        let mut btn = seeded(1, false);
        btn.step(true);
        btn.step(false);
        let state = btn.state();
        assert!(state.rising && state.falling);
        assert!(btn.consume_changed());
        assert!(!btn.consume_changed());
        assert!(!btn.consume_rising());
        assert!(!btn.consume_falling());
    }

    #[test]
    fn test_latch_survives_until_consumed() {
        let mut btn = seeded(2, false);
        btn.step(true);
        btn.step(true);
        for _ in 0..5 {
            btn.step(true);
        }
        assert!(btn.consume_rising());
    }

    #[test]
    fn test_try_new_rejects_zero() {
        assert!(Button::try_new(3, 0).is_err());
        assert_eq!(Button::try_new(3, 2).map(|b| b.threshold()), Ok(2));
    }

    #[test]
    fn test_edge_names() {
        assert_eq!(Edge::Rising.as_str(), "rising");
        assert_eq!(Edge::Falling.as_str(), "falling");
    }
}
