//! Type system enforcement tests for the battery domain newtypes.

// ── BatteryPercent ───────────────────────────────────────────────────────────

#[test]
fn battery_percent_new_clamps_over_100() {
    use platform::BatteryPercent;
    let p = BatteryPercent::new(180);
    assert_eq!(p.get(), 100, "BatteryPercent::new(180) should clamp to 100");
}

#[test]
fn battery_percent_new_allows_bounds() {
    use platform::BatteryPercent;
    assert_eq!(BatteryPercent::new(0), BatteryPercent::EMPTY);
    assert_eq!(BatteryPercent::new(100), BatteryPercent::FULL);
}

#[test]
fn battery_percent_try_new_rejects_over_100() {
    use platform::BatteryPercent;
    assert!(BatteryPercent::try_new(101).is_err());
    assert!(BatteryPercent::try_new(255).is_err());
    assert!(BatteryPercent::try_new(42).is_ok());
}

#[test]
fn battery_percent_is_one_byte() {
    use platform::BatteryPercent;
    assert_eq!(core::mem::size_of::<BatteryPercent>(), 1);
}

#[test]
fn battery_percent_orders_by_charge() {
    use platform::BatteryPercent;
    assert!(BatteryPercent::new(20) < BatteryPercent::new(80));
}

// ── BatteryReading ───────────────────────────────────────────────────────────

#[test]
fn reading_keeps_unclamped_volts() {
    use platform::BatteryReading;
    // Percent saturates, the displayed voltage does not.
    let r = BatteryReading::from_volts(8.33);
    assert!((r.volts - 8.33).abs() < f32::EPSILON);
    assert_eq!(r.percent.get(), 100);
}

#[test]
fn reading_from_zero_code_is_empty() {
    use platform::BatteryReading;
    let r = BatteryReading::from_raw_average(0.0);
    assert_eq!(r.percent.get(), 0);
}

// ── ButtonLevels ─────────────────────────────────────────────────────────────

#[test]
fn button_levels_is_four_bytes_or_less() {
    use platform::ButtonLevels;
    assert!(core::mem::size_of::<ButtonLevels>() <= 4);
}
