//! GPIO and analog input abstractions.
//!
//! Digital pins use the `embedded-hal` 1.0 traits directly
//! ([`embedded_hal::digital::OutputPin`] for the measurement enable line and
//! the buzzer, [`embedded_hal_async::digital::Wait`] for falling-edge
//! notification). The ADC has no `embedded-hal` 1.0 trait, so
//! [`AnalogInput`] fills that gap.

/// Pin state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinState {
    /// High (logic 1)
    High,
    /// Low (logic 0)
    Low,
}

impl PinState {
    /// `true` for [`PinState::Low`], the pressed level of an active-low button.
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl From<bool> for PinState {
    fn from(value: bool) -> Self {
        if value {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<PinState> for bool {
    fn from(value: PinState) -> Self {
        matches!(value, PinState::High)
    }
}

/// A single ADC channel returning raw conversion codes.
///
/// On the STM32F103 the ADC is 12-bit, so codes are `0..=4095`. Callers must
/// tolerate larger values: nothing in the conversion path rejects them.
pub trait AnalogInput {
    /// Error type
    type Error: core::fmt::Debug;

    /// Perform one conversion and return the raw code.
    fn read(&mut self) -> impl core::future::Future<Output = Result<u16, Self::Error>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_round_trip_matches_logic_levels() {
        assert_eq!(PinState::from(true), PinState::High);
        assert_eq!(PinState::from(false), PinState::Low);
        assert!(bool::from(PinState::High));
        assert!(!bool::from(PinState::Low));
    }

    #[test]
    fn low_is_pressed() {
        assert!(PinState::Low.is_low());
        assert!(!PinState::High.is_low());
    }
}
