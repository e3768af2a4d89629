//! Button input: debounce core and the two detection strategies.
//!
//! Detection never touches the display or the buzzer. It only raises pending
//! flags in the shared [`ButtonEvents`], which the dispatch loop drains.
//!
//! | Strategy          | Who observes transitions            | Gate check       |
//! |-------------------|-------------------------------------|------------------|
//! | [`PollingInput`]  | dispatch loop, every iteration      | once per sweep   |
//! | [`EdgeTriggered`] | one edge task per button ([`edge`]) | at signal time   |

pub mod builder;
pub mod debounce;
pub mod edge;
pub mod polling;

#[cfg(feature = "hardware")]
pub mod hardware;

pub use builder::InputBuilder;
pub use debounce::{Acceptance, ButtonEvents};
pub use edge::{edge_loop, EdgeTriggered};
pub use polling::PollingInput;
pub use platform::Button;

/// Per-iteration input step of the dispatch loop.
pub trait InputStrategy {
    /// Observe raw input at `now_ms` and raise flags for accepted presses.
    fn advance(&mut self, events: &ButtonEvents, now_ms: u32);
}
