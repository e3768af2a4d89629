//! Property-based tests for battery conversion math.
//! Verifies invariants hold for ALL inputs, not just fixed examples.

use platform::power::{centivolts, percent_from_centivolts, volts_from_raw};
use platform::{BatteryPercent, BatteryReading};

proptest::proptest! {
    /// BatteryPercent::new never panics and always clamps into 0..=100.
    #[test]
    fn battery_percent_new_never_exceeds_100(pct in 0u8..=255u8) {
        assert!(BatteryPercent::new(pct).get() <= 100);
    }

    /// Any centivolt value maps into 0..=100.
    #[test]
    fn percent_is_always_in_range(cv in 0u16..=u16::MAX) {
        assert!(percent_from_centivolts(cv).get() <= 100);
    }

    /// More voltage never means less charge.
    #[test]
    fn percent_is_monotone(a in 0u16..=600u16, b in 0u16..=600u16) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        assert!(percent_from_centivolts(lo) <= percent_from_centivolts(hi),
            "{} cV -> {:?} should be <= {} cV -> {:?}",
            lo, percent_from_centivolts(lo), hi, percent_from_centivolts(hi));
    }

    /// Voltage grows with the ADC code across the 12-bit range.
    #[test]
    fn volts_are_monotone_in_raw_code(a in 0u16..=4095u16, b in 0u16..=4095u16) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        assert!(volts_from_raw(f32::from(lo)) <= volts_from_raw(f32::from(hi)));
    }

    /// Readings never panic, even for codes above the 12-bit range.
    #[test]
    fn reading_from_any_code_never_panics(raw in 0u16..=u16::MAX) {
        let r = BatteryReading::from_raw_average(f32::from(raw));
        assert!(r.volts >= 0.0);
        assert!(r.percent.get() <= 100);
    }

    /// Rounding stays within half a centivolt of the exact value.
    #[test]
    fn centivolts_round_to_nearest(volts in 0.0f32..10.0f32) {
        let cv = f32::from(centivolts(volts));
        assert!((cv - volts * 100.0).abs() <= 0.5 + 1e-3);
    }
}
