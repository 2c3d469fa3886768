//! Debounce configuration defaults and a fluent button builder.
//!
//! Thresholds are measured in update ticks. Firmware usually thinks in
//! milliseconds, so [`ButtonBuilder`] converts a debounce time and the tick
//! period of the caller's scheduler into a threshold.
//!
//! # Example
//!
//! ```
//! use debounce::ButtonBuilder;
//!
//! // 20 ms debounce on a 5 ms tick → threshold 4
//! let btn = ButtonBuilder::new(4).debounce_ms(20).tick_period_ms(5).build().unwrap();
//! assert_eq!(btn.threshold(), 4);
//! ```

use crate::error::ConfigError;
use crate::integrator::{Button, PinId};

/// Event queue capacity used by [`Debouncer::new`](crate::Debouncer::new).
pub const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 8;

/// Threshold used by [`ButtonBuilder`] when nothing else is configured.
pub const DEFAULT_THRESHOLD: u8 = 5;

// ---------------------------------------------------------------------------
// ButtonBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a validated [`Button`].
///
/// Start with [`ButtonBuilder::new`], pick either [`threshold`] or
/// [`debounce_ms`] + [`tick_period_ms`], then call [`build`].
///
/// Whichever of [`threshold`] and [`debounce_ms`] is called last decides the
/// threshold. The tick period only matters once a debounce time is set, so
/// calling [`tick_period_ms`] alone keeps the explicit tick count.
///
/// [`threshold`]: ButtonBuilder::threshold
/// [`debounce_ms`]: ButtonBuilder::debounce_ms
/// [`tick_period_ms`]: ButtonBuilder::tick_period_ms
/// [`build`]: ButtonBuilder::build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBuilder {
    pin: PinId,
    ticks: u8,
    debounce_ms: Option<u32>,
    tick_ms: u32,
}

impl ButtonBuilder {
    /// Start building a button on `pin` with [`DEFAULT_THRESHOLD`] and a
    /// 1 ms tick period.
    pub const fn new(pin: PinId) -> Self {
        Self {
            pin,
            ticks: DEFAULT_THRESHOLD,
            debounce_ms: None,
            tick_ms: 1,
        }
    }

    /// Set the threshold directly, in ticks. Discards an earlier
    /// [`debounce_ms`](ButtonBuilder::debounce_ms).
    #[must_use]
    pub const fn threshold(mut self, ticks: u8) -> Self {
        self.ticks = ticks;
        self.debounce_ms = None;
        self
    }

    /// Set the debounce time in milliseconds.
    ///
    /// The tick period defaults to 1 ms until [`tick_period_ms`] is called.
    ///
    /// [`tick_period_ms`]: ButtonBuilder::tick_period_ms
    #[must_use]
    pub const fn debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = Some(ms);
        self
    }

    /// Set the period between [`Debouncer::update`](crate::Debouncer::update)
    /// calls, in milliseconds.
    #[must_use]
    pub const fn tick_period_ms(mut self, ms: u32) -> Self {
        self.tick_ms = ms;
        self
    }

    /// Threshold this builder resolves to.
    ///
    /// A debounce time shorter than one tick still needs one sample, so the
    /// millisecond path never resolves to zero.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroThreshold`] for an explicit zero tick count.
    /// - [`ConfigError::ZeroTickPeriod`] for a zero tick period.
    /// - [`ConfigError::ThresholdOverflow`] if more than 255 ticks are needed.
    pub fn resolve_threshold(&self) -> Result<u8, ConfigError> {
        match self.debounce_ms {
            None if self.ticks == 0 => Err(ConfigError::ZeroThreshold {
                index: 0,
                pin: self.pin,
            }),
            None => Ok(self.ticks),
            Some(_) if self.tick_ms == 0 => Err(ConfigError::ZeroTickPeriod),
            Some(debounce_ms) => {
                let ticks = debounce_ms.div_ceil(self.tick_ms).max(1);
                u8::try_from(ticks).map_err(|_| ConfigError::ThresholdOverflow { ticks })
            }
        }
    }

    /// Build the button.
    ///
    /// # Errors
    ///
    /// See [`ButtonBuilder::resolve_threshold`].
    pub fn build(self) -> Result<Button, ConfigError> {
        let threshold = self.resolve_threshold()?;
        Ok(Button::new(self.pin, threshold))
    }
}
