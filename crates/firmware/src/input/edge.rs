//! Edge-triggered input strategy.
//!
//! Each button gets its own [`edge_loop`] awaiting falling edges. On hardware
//! these run as an embassy task (see `input::hardware`); on the host they are
//! plain futures driven by the test runtime.

use embedded_hal_async::digital::Wait;
use platform::{Button, Clock};

use super::{Acceptance, ButtonEvents, InputStrategy};
use crate::log;

/// Dispatch-side half of the edge-triggered strategy.
///
/// Presses are detected by the edge loops, so there is nothing to do per
/// iteration.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTriggered;

impl InputStrategy for EdgeTriggered {
    fn advance(&mut self, _events: &ButtonEvents, _now_ms: u32) {}
}

/// Wait for falling edges on `pin` and feed them to the debounce gate.
///
/// Runs until the pin reports an error. EXTI inputs are infallible, so on
/// hardware this never returns.
pub async fn edge_loop<W, C>(pin: &mut W, button: Button, events: &ButtonEvents, clock: &C)
where
    W: Wait,
    C: Clock,
{
    while pin.wait_for_falling_edge().await.is_ok() {
        let now = clock.now_ms();
        match events.on_falling_edge(button, now) {
            Acceptance::Recorded => log::debug!("{} pressed at {} ms", button, now),
            Acceptance::Coalesced => log::trace!("{} press coalesced", button),
            Acceptance::Debounced => log::trace!("{} edge debounced at {} ms", button, now),
        }
    }
    log::warn!("edge input for {} stopped", button);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{MockClock, MockEdgePin};

    #[tokio::test]
    async fn bouncing_edges_collapse_to_one_press() {
        let clock = MockClock::default();
        let mut pin = MockEdgePin::new(clock.clone(), [1_000, 1_004, 1_011, 1_150]);
        let events = ButtonEvents::new(200);

        edge_loop(&mut pin, Button::Ok, &events, &clock).await;

        assert!(events.take_and_clear(Button::Ok));
        assert!(!events.take_and_clear(Button::Ok));
        assert_eq!(events.last_accepted_ms(), 1_000);
    }

    #[tokio::test]
    async fn edges_spaced_beyond_window_coalesce_until_serviced() {
        let clock = MockClock::default();
        let mut pin = MockEdgePin::new(clock.clone(), [500, 900]);
        let events = ButtonEvents::new(300);

        edge_loop(&mut pin, Button::Next, &events, &clock).await;

        assert_eq!(events.last_accepted_ms(), 900);
        assert!(events.take_and_clear(Button::Next));
        assert!(!events.is_pending(Button::Next));
    }

    #[test]
    fn dispatch_side_is_a_no_op() {
        let events = ButtonEvents::new(10);
        EdgeTriggered.advance(&events, 1_000);
        for button in Button::ALL {
            assert!(!events.is_pending(button));
        }
    }
}
