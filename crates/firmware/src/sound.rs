//! Buzzer driver and the firmware's sound cues.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use thiserror_no_std::Error;

use platform::sound::{CONFIRM_TONE, MELODY_GAP_MS, STARTUP_MELODY};
use platform::{Note, SoundEffector};

/// Buzzer pin could not be driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("buzzer pin error")]
pub struct BuzzerError;

/// Passive piezo buzzer driven by toggling a GPIO (PA4).
///
/// Each tone is a square wave with a half period of `500_000 / f` µs repeated
/// for `f * duration / 1000` cycles. The pin is left low afterwards.
pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    /// Take the pin and drive it low.
    pub fn new(mut pin: P, delay: D) -> Result<Self, BuzzerError> {
        pin.set_low().map_err(|_| BuzzerError)?;
        Ok(Self { pin, delay })
    }

    /// Give the pin back.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}

/// Half period in µs and full cycle count for one tone.
///
/// A zero frequency is a rest: no cycles.
pub const fn square_wave(frequency_hz: u32, duration_ms: u32) -> (u32, u32) {
    if frequency_hz == 0 {
        return (0, 0);
    }
    #[allow(clippy::arithmetic_side_effects, clippy::integer_division)]
    let half_period_us = 500_000 / frequency_hz;
    let cycles = frequency_hz.saturating_mul(duration_ms) / 1_000;
    (half_period_us, cycles)
}

impl<P: OutputPin, D: DelayNs> SoundEffector for Buzzer<P, D> {
    type Error = BuzzerError;

    async fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Self::Error> {
        let (half_period_us, cycles) = square_wave(frequency_hz, duration_ms);
        if cycles == 0 {
            self.delay.delay_ms(duration_ms).await;
            return Ok(());
        }
        for _ in 0..cycles {
            self.pin.set_high().map_err(|_| BuzzerError)?;
            self.delay.delay_us(half_period_us).await;
            self.pin.set_low().map_err(|_| BuzzerError)?;
            self.delay.delay_us(half_period_us).await;
        }
        Ok(())
    }
}

/// Play one note.
pub async fn play<S: SoundEffector>(sound: &mut S, note: Note) -> Result<(), S::Error> {
    sound.tone(note.frequency_hz, note.duration_ms).await
}

/// Beep for an accepted button press (1 kHz, 100 ms).
pub async fn play_confirm<S: SoundEffector>(sound: &mut S) -> Result<(), S::Error> {
    play(sound, CONFIRM_TONE).await
}

/// Ascending start-up cue with a short silence between notes.
pub async fn play_startup<S, D>(sound: &mut S, delay: &mut D) -> Result<(), S::Error>
where
    S: SoundEffector,
    D: DelayNs,
{
    for (i, note) in STARTUP_MELODY.into_iter().enumerate() {
        if i > 0 {
            delay.delay_ms(MELODY_GAP_MS).await;
        }
        play(sound, note).await?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{MockClock, MockDelay, MockOutputPin, MockSound};
    use platform::Clock as _;

    #[test]
    fn confirm_tone_wave_shape() {
        assert_eq!(square_wave(1_000, 100), (500, 100));
        assert_eq!(square_wave(440, 100), (1_136, 44));
        assert_eq!(square_wave(0, 100), (0, 0));
    }

    #[tokio::test]
    async fn buzzer_toggles_once_per_cycle_and_ends_low() {
        let pin = MockOutputPin::new();
        let clock = MockClock::default();
        let mut buzzer = Buzzer::new(pin.clone(), MockDelay::new(clock.clone())).unwrap();

        buzzer.tone(1_000, 100).await.unwrap();

        assert_eq!(pin.rising_edges(), 100);
        assert!(!pin.is_high());
        assert_eq!(clock.now_ms(), 100);
    }

    #[tokio::test]
    async fn rest_only_waits() {
        let pin = MockOutputPin::new();
        let clock = MockClock::default();
        let mut buzzer = Buzzer::new(pin.clone(), MockDelay::new(clock.clone())).unwrap();

        buzzer.tone(0, 30).await.unwrap();

        assert_eq!(pin.rising_edges(), 0);
        assert_eq!(clock.now_ms(), 30);
    }

    #[tokio::test]
    async fn startup_plays_melody_with_gaps() {
        let clock = MockClock::default();
        let mut sound = MockSound::with_clock(clock.clone());
        let mut delay = MockDelay::new(clock.clone());

        play_startup(&mut sound, &mut delay).await.unwrap();

        assert_eq!(sound.notes(), STARTUP_MELODY);
        assert_eq!(delay.ms_calls(), [30, 30, 30]);
        assert_eq!(clock.now_ms(), 100 + 100 + 100 + 150 + 3 * 30);
    }

    #[tokio::test]
    async fn startup_stops_on_first_failure() {
        let mut sound = MockSound::new();
        sound.set_failing(true);
        let mut delay = MockDelay::new(MockClock::default());

        assert!(play_startup(&mut sound, &mut delay).await.is_err());
        assert!(delay.ms_calls().is_empty());
    }
}
