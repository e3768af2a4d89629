//! Sound effector abstraction and the firmware's fixed cues.

/// Tone generator.
///
/// A call returns once the tone has finished playing. The dispatch loop
/// awaits it in line, so implementations must keep tones short.
pub trait SoundEffector {
    /// Error type
    type Error: core::fmt::Debug;

    /// Play a square wave at `frequency_hz` for roughly `duration_ms`.
    fn tone(
        &mut self,
        frequency_hz: u32,
        duration_ms: u32,
    ) -> impl core::future::Future<Output = Result<(), Self::Error>>;
}

/// One note of a cue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Note {
    /// Pitch in Hz.
    pub frequency_hz: u32,
    /// Length in milliseconds.
    pub duration_ms: u32,
}

impl Note {
    /// Create a note.
    #[must_use]
    pub const fn new(frequency_hz: u32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
        }
    }
}

/// Short beep played for every accepted button press (1 kHz, 100 ms).
pub const CONFIRM_TONE: Note = Note::new(1_000, 100);

/// Ascending start-up cue: A4, C5, E5, A5.
pub const STARTUP_MELODY: [Note; 4] = [
    Note::new(440, 100),
    Note::new(523, 100),
    Note::new(659, 100),
    Note::new(880, 150),
];

/// Silence between start-up notes.
pub const MELODY_GAP_MS: u32 = 30;
