//! [`PinReader`] adapter over `embedded-hal` input pins.
//!
//! [`InputPins`] maps pin id `n` to the `n`th pin of a caller-owned slice,
//! so a button table can be written against board-local indices:
//!
//! ```
//! use core::convert::Infallible;
//! use debounce::{Button, Debouncer, InputPins};
//! use embedded_hal::digital::{ErrorType, InputPin};
//!
//! struct Tied(bool);
//! impl ErrorType for Tied {
//!     type Error = Infallible;
//! }
//! impl InputPin for Tied {
//!     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(self.0) }
//!     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(!self.0) }
//! }
//!
//! let mut pins = [Tied(false), Tied(true)];
//! let mut buttons = [Button::new(0, 3), Button::new(1, 3)];
//! let db = Debouncer::new(&mut buttons, InputPins::active_high(&mut pins)).unwrap();
//! assert!(db.read(1));
//! ```
//!
//! A read error, or a pin id past the end of the slice, reads as inactive
//! and is logged at warn level. The integrator then treats it like any other
//! noisy sample.

use embedded_hal::digital::InputPin;

use crate::integrator::PinId;
use crate::registry::PinReader;

/// Electrical level that counts as "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Pressed reads high (pull-down wiring).
    High,
    /// Pressed reads low (pull-up wiring, switch to ground).
    Low,
}

/// A [`PinReader`] over a slice of `embedded-hal` input pins.
pub struct InputPins<'a, P> {
    pins: &'a mut [P],
    active: ActiveLevel,
}

impl<'a, P> InputPins<'a, P>
where
    P: InputPin,
{
    /// Adapter with an explicit active level.
    pub fn new(pins: &'a mut [P], active: ActiveLevel) -> Self {
        Self { pins, active }
    }

    /// Adapter where a high pin is a pressed button.
    pub fn active_high(pins: &'a mut [P]) -> Self {
        Self::new(pins, ActiveLevel::High)
    }

    /// Adapter where a low pin is a pressed button.
    pub fn active_low(pins: &'a mut [P]) -> Self {
        Self::new(pins, ActiveLevel::Low)
    }

    /// Configured active level.
    pub fn active_level(&self) -> ActiveLevel {
        self.active
    }
}

impl<P> PinReader for InputPins<'_, P>
where
    P: InputPin,
{
    fn read(&mut self, pin: PinId) -> bool {
        let Some(io) = self.pins.get_mut(usize::from(pin)) else {
            warn!("pin {} is not mapped, reading as inactive", pin);
            return false;
        };
        let level = match self.active {
            ActiveLevel::High => io.is_high(),
            ActiveLevel::Low => io.is_low(),
        };
        level.unwrap_or_else(|_| {
            warn!("pin {} read failed, reading as inactive", pin);
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ActiveLevel, InputPins};
    use crate::registry::PinReader;
    use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

    struct FakePin {
        level: Result<bool, ErrorKind>,
    }

    impl ErrorType for FakePin {
        type Error = ErrorKind;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, ErrorKind> {
            self.level
        }

        fn is_low(&mut self) -> Result<bool, ErrorKind> {
            self.level.map(|high| !high)
        }
    }

    fn pins() -> [FakePin; 3] {
        [
            FakePin { level: Ok(true) },
            FakePin { level: Ok(false) },
            FakePin {
                level: Err(ErrorKind::Other),
            },
        ]
    }

    #[test]
    fn test_active_high_passes_level_through() {
        let mut p = pins();
        let mut reader = InputPins::active_high(&mut p);
        assert_eq!(reader.active_level(), ActiveLevel::High);
        assert!(reader.read(0));
        assert!(!reader.read(1));
    }

    #[test]
    fn test_active_low_inverts() {
        let mut p = pins();
        let mut reader = InputPins::active_low(&mut p);
        assert!(!reader.read(0));
        assert!(reader.read(1));
    }

    #[test]
    fn test_error_reads_inactive() {
        let mut p = pins();
        assert!(!InputPins::active_high(&mut p).read(2));
        assert!(!InputPins::active_low(&mut p).read(2));
    }

    #[test]
    fn test_unmapped_pin_reads_inactive() {
        let mut p = pins();
        let mut reader = InputPins::new(&mut p, ActiveLevel::Low);
        assert!(!reader.read(200));
    }
}
