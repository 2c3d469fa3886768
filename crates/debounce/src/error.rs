//! Configuration errors.
//!
//! Runtime paths (`update`, accessors, queue operations) cannot fail: queue
//! overflow evicts the oldest event and an empty queue pops `None`. The only
//! failures are bad configuration, reported once at construction.

use crate::integrator::PinId;

/// Error returned when a debouncer or button is configured incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The button slice handed to the debouncer was empty.
    #[error("no buttons configured")]
    NoButtons,
    /// A button was configured with a threshold of zero.
    #[error("button {index} (pin {pin}) has a zero threshold")]
    ZeroThreshold {
        /// Registration index of the offending button.
        index: usize,
        /// Pin of the offending button.
        pin: PinId,
    },
    /// A millisecond-based configuration used a zero tick period.
    #[error("tick period must be at least 1 ms")]
    ZeroTickPeriod,
    /// The requested debounce time needs more ticks than a threshold can hold.
    #[error("debounce time needs {ticks} ticks, more than the maximum of 255")]
    ThresholdOverflow {
        /// Number of ticks the configuration asked for.
        ticks: u32,
    },
}

impl ConfigError {
    /// Short, allocation-free description for log output.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NoButtons => "no buttons configured",
            Self::ZeroThreshold { .. } => "zero threshold",
            Self::ZeroTickPeriod => "zero tick period",
            Self::ThresholdOverflow { .. } => "threshold overflow",
        }
    }
}
