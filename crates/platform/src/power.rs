//! Battery voltage conversion and state-of-charge estimation.
//!
//! The pack voltage reaches the ADC through a switched resistor divider
//! (VMETER_CTL enables it, VMETER_SIG is the tap). Conversion is:
//!
//! ```text
//! volts      = raw_average / 4095 * 3.3 * 5.05
//! centivolts = round(volts * 100), clamped to 300..=420
//! percent    = (centivolts - 300) * 100 / 120
//! ```
//!
//! The 5.05 divider ratio is the board's calibrated constant. With plausible
//! ADC codes it yields voltages well above the 3.0–4.2 V LiPo range (code
//! 2048 gives ~8.33 V), which points at a calibration defect on the board.
//! It is kept as-is so readings match the existing units.

use thiserror_no_std::Error;

/// ADC reference voltage.
pub const ADC_REFERENCE_VOLTS: f32 = 3.3;

/// Highest 12-bit ADC conversion code.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Calibrated divider ratio between VMETER_SIG and the pack voltage.
pub const DIVIDER_RATIO: f32 = 5.05;

/// 0 % point: 3.00 V expressed in centivolts.
pub const EMPTY_CENTIVOLTS: u16 = 300;

/// 100 % point: 4.20 V expressed in centivolts.
pub const FULL_CENTIVOLTS: u16 = 420;

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

/// State of charge as a percentage, clamped to 0–100.
///
/// Wraps a `u8` with the invariant `0 <= value <= 100`.
/// Construct with [`BatteryPercent::new`] (clamping) or
/// [`BatteryPercent::try_new`] (fallible, strict).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct BatteryPercent(u8);

impl BatteryPercent {
    /// Empty battery.
    pub const EMPTY: Self = Self(0);

    /// Full battery.
    pub const FULL: Self = Self(100);

    /// Create a `BatteryPercent`, clamping values above 100 to 100.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Create a `BatteryPercent`, returning an error if `value > 100`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `value > 100`.
    pub fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
        if value > 100 {
            Err(OutOfRangeError {
                value: u32::from(value),
                min: 0,
                max: 100,
            })
        } else {
            Ok(Self(value))
        }
    }

    /// Return the inner value (0–100).
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Convert an averaged raw ADC code to pack volts.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn volts_from_raw(raw_average: f32) -> f32 {
    raw_average / f32::from(ADC_FULL_SCALE) * ADC_REFERENCE_VOLTS * DIVIDER_RATIO
}

/// Volts to the nearest centivolt.
///
/// Float-to-int `as` casts saturate, so negative and NaN inputs give 0 and
/// huge inputs give `u16::MAX`.
#[must_use]
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn centivolts(volts: f32) -> u16 {
    (volts * 100.0 + 0.5) as u16
}

/// Linear state of charge between 3.00 V (0 %) and 4.20 V (100 %).
#[must_use]
pub fn percent_from_centivolts(centivolts: u16) -> BatteryPercent {
    let clamped = centivolts.clamp(EMPTY_CENTIVOLTS, FULL_CENTIVOLTS);
    // clamped >= EMPTY_CENTIVOLTS, so the subtraction cannot underflow, and
    // (420 - 300) * 100 = 12_000 fits in u16.
    #[allow(clippy::arithmetic_side_effects, clippy::integer_division)]
    let pct = (clamped - EMPTY_CENTIVOLTS) * 100 / (FULL_CENTIVOLTS - EMPTY_CENTIVOLTS);
    #[allow(clippy::cast_possible_truncation)]
    BatteryPercent::new(pct as u8)
}

/// One completed battery measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    /// Pack voltage in volts.
    pub volts: f32,
    /// Estimated state of charge.
    pub percent: BatteryPercent,
}

impl BatteryReading {
    /// Build a reading from a pack voltage.
    #[must_use]
    pub fn from_volts(volts: f32) -> Self {
        Self {
            volts,
            percent: percent_from_centivolts(centivolts(volts)),
        }
    }

    /// Build a reading from an averaged raw ADC code.
    #[must_use]
    pub fn from_raw_average(raw_average: f32) -> Self {
        Self::from_volts(volts_from_raw(raw_average))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_reference_points() {
        assert_eq!(BatteryReading::from_volts(3.00).percent.get(), 0);
        assert_eq!(BatteryReading::from_volts(3.60).percent.get(), 50);
        assert_eq!(BatteryReading::from_volts(4.20).percent.get(), 100);
    }

    #[test]
    fn percent_clamps_outside_calibrated_range() {
        assert_eq!(BatteryReading::from_volts(2.10).percent, BatteryPercent::EMPTY);
        assert_eq!(BatteryReading::from_volts(8.33).percent, BatteryPercent::FULL);
        assert_eq!(BatteryReading::from_volts(-1.0).percent, BatteryPercent::EMPTY);
    }

    #[test]
    fn half_scale_code_uses_literal_divider_formula() {
        let volts = volts_from_raw(2048.0);
        assert!((volts - 8.3345).abs() < 0.001, "got {volts}");
    }

    #[test]
    fn zero_code_is_zero_volts() {
        assert!(volts_from_raw(0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn centivolts_rounds_to_nearest() {
        assert_eq!(centivolts(3.604), 360);
        assert_eq!(centivolts(3.606), 361);
        assert_eq!(centivolts(f32::NAN), 0);
    }

    #[test]
    fn percent_integer_mapping_truncates() {
        // 3.01 V → (301 - 300) * 100 / 120 = 0
        assert_eq!(percent_from_centivolts(301).get(), 0);
        // 3.02 V → 200 / 120 = 1
        assert_eq!(percent_from_centivolts(302).get(), 1);
        assert_eq!(percent_from_centivolts(419).get(), 99);
    }

    #[test]
    fn out_of_range_error_message() {
        let err = BatteryPercent::try_new(101).unwrap_err();
        assert_eq!(err.to_string(), "value 101 outside 0..=100");
    }
}
