//! Boot sequence integration tests.
//!
//! Run with: cargo test -p firmware --test integration_boot
#![allow(clippy::unwrap_used, clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use firmware::boot::{self, BootError, BOOT_SEQUENCE_STEPS};
use firmware::sound::Buzzer;
use platform::config::{APP_NAME, SPLASH_GREETING};
use platform::mocks::{MockClock, MockDelay, MockDisplay, MockOutputPin, MockSound};
use platform::sound::{MELODY_GAP_MS, STARTUP_MELODY};
use platform::Clock;

#[test]
fn boot_steps_are_ordered() {
    let display = BOOT_SEQUENCE_STEPS.iter().position(|s| s.contains("Display"));
    let splash = BOOT_SEQUENCE_STEPS.iter().position(|s| s.contains("Splash"));
    let melody = BOOT_SEQUENCE_STEPS.iter().position(|s| s.contains("Melody"));
    assert!(display < splash && splash < melody);
}

#[test]
fn splash_text_constants() {
    assert_eq!(SPLASH_GREETING, "Hello world");
    assert_eq!(APP_NAME, "LoadScale");
}

#[tokio::test]
async fn boot_with_real_buzzer_takes_melody_time() {
    let clock = MockClock::default();
    let pin = MockOutputPin::new();
    let mut buzzer = Buzzer::new(pin.clone(), MockDelay::new(clock.clone())).unwrap();
    let mut display = MockDisplay::oled();
    let mut delay = MockDelay::new(clock.clone());

    boot::start(&mut display, &mut buzzer, &mut delay).await.unwrap();

    let tones: u32 = STARTUP_MELODY.iter().map(|n| n.duration_ms).sum();
    let gaps = MELODY_GAP_MS * (STARTUP_MELODY.len() as u32 - 1);
    // Integer half periods make each tone a few µs short of its nominal length.
    let elapsed = clock.now_ms();
    assert!(elapsed <= tones + gaps && elapsed + 5 >= tones + gaps, "{elapsed} ms");

    // 44 + 52 + 65 + 132 square-wave cycles
    assert_eq!(pin.rising_edges(), 293);
    assert!(!pin.is_high());
    assert_eq!(display.present_count(), 1);
}

#[tokio::test]
async fn failed_display_skips_everything_else() {
    let mut display = MockDisplay::oled().failing_init();
    let mut sound = MockSound::new();
    let mut delay = MockDelay::new(MockClock::default());

    assert_eq!(
        boot::start(&mut display, &mut sound, &mut delay).await,
        Err(BootError::DisplayInit)
    );
    assert_eq!(display.init_count(), 1);
    assert_eq!(display.visible_lit_pixels(), 0);
    assert!(sound.notes().is_empty());
}

#[test]
fn boot_error_message() {
    assert_eq!(BootError::DisplayInit.to_string(), "display initialization failed");
}
