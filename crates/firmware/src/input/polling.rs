//! Polling input strategy.

use platform::{Button, ButtonLevels, ButtonPins, PinState};

use super::{Acceptance, ButtonEvents, InputStrategy};
use crate::log;

/// Samples raw levels every loop iteration and detects HIGH→LOW transitions.
///
/// The debounce gate is evaluated once per sweep, before any button is
/// examined. Two buttons seen going low in the same sweep are therefore both
/// accepted. The remembered level follows every change, accepted or not, so a
/// press that was debounced away is not re-detected while it stays held.
pub struct PollingInput<P> {
    pins: P,
    last: ButtonLevels,
}

impl<P: ButtonPins> PollingInput<P> {
    /// Take ownership of the pins and read the start-up levels.
    pub fn new(mut pins: P) -> Self {
        let last = pins.levels();
        Self { pins, last }
    }

    /// Levels observed on the previous sweep.
    pub fn last_levels(&self) -> ButtonLevels {
        self.last
    }

    /// Give the pins back.
    pub fn release(self) -> P {
        self.pins
    }
}

impl<P: ButtonPins> InputStrategy for PollingInput<P> {
    fn advance(&mut self, events: &ButtonEvents, now_ms: u32) {
        let current = self.pins.levels();
        let gate_open = events.gate_open(now_ms);

        for button in Button::ALL {
            let before = self.last.level(button);
            let now = current.level(button);
            if before == now {
                continue;
            }
            if before == PinState::High && now.is_low() {
                if gate_open {
                    match events.record_accepted(button, now_ms) {
                        Acceptance::Recorded => log::debug!("{} pressed at {} ms", button, now_ms),
                        _ => log::trace!("{} press coalesced", button),
                    }
                } else {
                    log::trace!("{} press debounced", button);
                }
            }
        }
        self.last = current;
    }
}
