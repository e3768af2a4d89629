//! Architecture boundary tests. Run with `cargo test -p firmware --test arch_boundaries`
//!
//! Layering rules:
//!   Rule 1: platform (traits, config, math) must not depend on firmware
//!   Rule 2: firmware library code compiles for the host without embassy
//!   Rule 3: detection and effects only meet in `ButtonEvents`
//!
//! Like the dependency graph itself, most of these are compile-time checks:
//! if this test binary links, the boundary holds.

use firmware::input::ButtonEvents;

/// Platform traits are nameable without any firmware type.
#[test]
fn platform_hal_is_independent() {
    fn _display<T: platform::StatusDisplay>() {}
    fn _sound<T: platform::SoundEffector>() {}
    fn _adc<T: platform::AnalogInput>() {}
    fn _buttons<T: platform::ButtonPins>() {}
    fn _clock<T: platform::Clock>() {}
}

/// The shared event state is `Sync` and can sit in a `static`.
#[test]
fn button_events_are_sync_and_static() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<ButtonEvents>();

    static EVENTS: ButtonEvents = ButtonEvents::new(200);
    assert_eq!(EVENTS.window_ms(), 200);
}

/// Host builds pick up every profile preset without hardware features.
#[test]
fn profiles_resolve_on_host() {
    use firmware::input::InputBuilder;
    use platform::config::{FirmwareProfile, InputMode};

    for (profile, mode, window) in [
        (FirmwareProfile::POLLING, InputMode::Polling, 50),
        (FirmwareProfile::EDGE_TRIGGERED, InputMode::EdgeTriggered, 200),
        (FirmwareProfile::EDGE_WITH_BATTERY, InputMode::EdgeTriggered, 300),
    ] {
        let builder = InputBuilder::from_profile(&profile);
        assert_eq!(builder.mode(), mode);
        assert_eq!(builder.events().window_ms(), window);
    }
}
