//! Global debounce gate and per-button pending flags.
//!
//! [`ButtonEvents`] is the only state shared between the asynchronous edge
//! handlers and the dispatch loop. Everything is a lock-free atomic:
//!
//! - one pending flag per button, raised by an accepted press and consumed
//!   with an atomic swap by the dispatch loop;
//! - one *global* last-accepted timestamp. Any accepted press, on any button,
//!   closes the window for all buttons.
//!
//! A press is accepted only when strictly more than the window has elapsed
//! since the last accepted press. The timestamp starts at 0, so presses within
//! the first window after boot are rejected as well.
//!
//! The timestamp advance uses compare-exchange, so two handlers racing on the
//! same window can never both be accepted.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use platform::{elapsed_ms, Button};

/// What happened to one press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Acceptance {
    /// Accepted; the button's flag was raised.
    Recorded,
    /// Accepted, but the flag was already raised and not yet serviced.
    Coalesced,
    /// Inside the debounce window; nothing changed.
    Debounced,
}

impl Acceptance {
    /// Whether the press moved the debounce window.
    pub const fn accepted(self) -> bool {
        !matches!(self, Self::Debounced)
    }
}

/// Shared pending flags plus the global debounce timestamp.
///
/// Designed to live in a `static` (or a `StaticCell`) and be borrowed by every
/// edge handler and the dispatch loop at once.
#[derive(Debug)]
pub struct ButtonEvents {
    pending: [AtomicBool; Button::COUNT],
    last_accepted_ms: AtomicU32,
    window_ms: u32,
}

impl ButtonEvents {
    /// No presses pending, window anchored at t = 0.
    pub const fn new(window_ms: u32) -> Self {
        Self {
            pending: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
            last_accepted_ms: AtomicU32::new(0),
            window_ms,
        }
    }

    /// Debounce window in milliseconds.
    pub const fn window_ms(&self) -> u32 {
        self.window_ms
    }

    /// Timestamp of the last accepted press.
    pub fn last_accepted_ms(&self) -> u32 {
        self.last_accepted_ms.load(Ordering::Acquire)
    }

    /// Whether a press at `now_ms` would fall outside the window.
    pub fn gate_open(&self, now_ms: u32) -> bool {
        elapsed_ms(now_ms, self.last_accepted_ms()) > self.window_ms
    }

    fn flag(&self, button: Button) -> &AtomicBool {
        // index() is always < COUNT, the array length.
        #[allow(clippy::indexing_slicing)]
        &self.pending[button.index()]
    }

    /// Raise `button`'s flag. Returns `true` if it was already raised.
    pub fn set_pending(&self, button: Button) -> bool {
        self.flag(button).swap(true, Ordering::AcqRel)
    }

    /// Read and lower `button`'s flag in one step.
    ///
    /// A press recorded concurrently either shows up in this call or stays
    /// pending for the next one; it is never lost.
    pub fn take_and_clear(&self, button: Button) -> bool {
        self.flag(button).swap(false, Ordering::AcqRel)
    }

    /// Peek at `button`'s flag without consuming it.
    pub fn is_pending(&self, button: Button) -> bool {
        self.flag(button).load(Ordering::Acquire)
    }

    /// Falling-edge entry point.
    ///
    /// Safe to call from several concurrent handlers. At most one press per
    /// window is accepted regardless of which buttons fire.
    pub fn on_falling_edge(&self, button: Button, now_ms: u32) -> Acceptance {
        let last = self.last_accepted_ms.load(Ordering::Acquire);
        if elapsed_ms(now_ms, last) <= self.window_ms {
            return Acceptance::Debounced;
        }
        if self
            .last_accepted_ms
            .compare_exchange(last, now_ms, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Another handler accepted a press in the meantime.
            return Acceptance::Debounced;
        }
        self.mark(button)
    }

    /// Record a press the caller already found outside the window.
    ///
    /// Used by the polling strategy, which checks the gate once per sweep and
    /// then records every qualifying button.
    pub fn record_accepted(&self, button: Button, now_ms: u32) -> Acceptance {
        self.last_accepted_ms.store(now_ms, Ordering::Release);
        self.mark(button)
    }

    fn mark(&self, button: Button) -> Acceptance {
        if self.set_pending(button) {
            Acceptance::Coalesced
        } else {
            Acceptance::Recorded
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn first_window_after_boot_is_closed() {
        let events = ButtonEvents::new(200);
        assert_eq!(events.on_falling_edge(Button::Ok, 150), Acceptance::Debounced);
        assert_eq!(events.on_falling_edge(Button::Ok, 200), Acceptance::Debounced);
        assert_eq!(events.on_falling_edge(Button::Ok, 201), Acceptance::Recorded);
        assert!(events.is_pending(Button::Ok));
        assert_eq!(events.last_accepted_ms(), 201);
    }

    #[test]
    fn window_is_shared_by_all_buttons() {
        let events = ButtonEvents::new(200);
        assert!(events.on_falling_edge(Button::Next, 1_000).accepted());
        assert_eq!(events.on_falling_edge(Button::Prev, 1_050), Acceptance::Debounced);
        assert!(!events.is_pending(Button::Prev));
        assert!(events.on_falling_edge(Button::Prev, 1_201).accepted());
    }

    #[test]
    fn rejected_press_does_not_extend_window() {
        let events = ButtonEvents::new(300);
        events.on_falling_edge(Button::Ok, 1_000);
        events.on_falling_edge(Button::Ok, 1_250);
        assert_eq!(events.last_accepted_ms(), 1_000);
        assert_eq!(events.on_falling_edge(Button::Ok, 1_301), Acceptance::Coalesced);
    }

    #[test]
    fn unserviced_press_coalesces() {
        let events = ButtonEvents::new(50);
        assert_eq!(events.on_falling_edge(Button::Cancel, 100), Acceptance::Recorded);
        assert_eq!(events.on_falling_edge(Button::Cancel, 200), Acceptance::Coalesced);
        assert!(events.take_and_clear(Button::Cancel));
        assert!(!events.take_and_clear(Button::Cancel));
    }

    #[test]
    fn take_and_clear_only_touches_one_button() {
        let events = ButtonEvents::new(50);
        events.set_pending(Button::Ok);
        events.set_pending(Button::Next);
        assert!(events.take_and_clear(Button::Ok));
        assert!(events.is_pending(Button::Next));
    }

    #[test]
    fn gate_survives_counter_wrap() {
        let events = ButtonEvents::new(200);
        events.record_accepted(Button::Ok, u32::MAX - 50);
        assert!(!events.gate_open(100));
        assert!(events.gate_open(150));
    }

    #[test]
    fn concurrent_edges_accept_one_press_per_window() {
        use std::sync::Arc;
        use std::thread;

        let events = Arc::new(ButtonEvents::new(200));
        let handles: Vec<_> = Button::ALL
            .iter()
            .map(|&button| {
                let events = Arc::clone(&events);
                thread::spawn(move || events.on_falling_edge(button, 5_000))
            })
            .collect();
        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|a| a.accepted())
            .count();
        assert_eq!(accepted, 1);
        let pending = Button::ALL.iter().filter(|&&b| events.is_pending(b)).count();
        assert_eq!(pending, 1);
    }
}
