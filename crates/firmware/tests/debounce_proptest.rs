//! Property-based tests for the global debounce gate.
#![allow(clippy::arithmetic_side_effects, clippy::indexing_slicing)]

use firmware::input::{Acceptance, Button, ButtonEvents};
use proptest::prelude::*;

fn button() -> impl Strategy<Value = Button> {
    prop::sample::select(Button::ALL.to_vec())
}

proptest! {
    /// Accepted presses are always strictly more than one window apart,
    /// whichever buttons they came from.
    #[test]
    fn accepted_presses_are_spaced_by_window(
        window in 1u32..500,
        presses in prop::collection::vec((button(), 0u32..400), 1..60),
    ) {
        let events = ButtonEvents::new(window);
        let mut now = 0u32;
        let mut accepted = Vec::new();
        for (button, gap) in presses {
            now += gap;
            if events.on_falling_edge(button, now).accepted() {
                accepted.push(now);
            }
        }
        for pair in accepted.windows(2) {
            prop_assert!(pair[1] - pair[0] > window);
        }
        if let Some(&first) = accepted.first() {
            prop_assert!(first > window);
        }
    }

    /// The gate matches a plain reference model of "last accepted + window".
    #[test]
    fn gate_matches_reference_model(
        window in 0u32..300,
        presses in prop::collection::vec((button(), 0u32..200), 1..60),
    ) {
        let events = ButtonEvents::new(window);
        let mut last = 0u32;
        let mut pending = [false; Button::COUNT];
        let mut now = 0u32;
        for (button, gap) in presses {
            now += gap;
            let expected = if now - last > window {
                last = now;
                let was = pending[button.index()];
                pending[button.index()] = true;
                if was { Acceptance::Coalesced } else { Acceptance::Recorded }
            } else {
                Acceptance::Debounced
            };
            prop_assert_eq!(events.on_falling_edge(button, now), expected);
        }
        prop_assert_eq!(events.last_accepted_ms(), last);
        for button in Button::ALL {
            prop_assert_eq!(events.take_and_clear(button), pending[button.index()]);
            prop_assert!(!events.is_pending(button));
        }
    }

    /// The gate keeps working across the u32 millisecond wrap.
    #[test]
    fn gate_survives_counter_wrap(window in 1u32..1_000, before in 1u32..1_000) {
        let events = ButtonEvents::new(window);
        let start = u32::MAX - before;
        events.record_accepted(Button::Ok, start);
        let inside = start.wrapping_add(window);
        let outside = start.wrapping_add(window + 1);
        prop_assert_eq!(events.on_falling_edge(Button::Next, inside), Acceptance::Debounced);
        prop_assert!(events.on_falling_edge(Button::Next, outside).accepted());
    }
}
