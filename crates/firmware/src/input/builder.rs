//! Fluent builder API for button input configuration.
//!
//! The builder only carries non-pin configuration (detection mode and the
//! debounce window). GPIO objects are handed to the strategy constructors or
//! to `input::hardware::spawn_edge_task` directly, which keeps embassy pin
//! types out of the builder.
//!
//! # Usage
//!
//! ```
//! use firmware::input::InputBuilder;
//! use platform::InputMode;
//!
//! let config = InputBuilder::edge_triggered().debounce_ms(300);
//! assert_eq!(config.mode(), InputMode::EdgeTriggered);
//!
//! let events = config.events();
//! assert_eq!(events.window_ms(), 300);
//! ```

use platform::config::timing;
use platform::{FirmwareProfile, InputMode};

use super::ButtonEvents;

/// Fluent builder for the button input path.
///
/// Call [`InputBuilder::polling()`] or [`InputBuilder::edge_triggered()`] to
/// start, optionally override the window, then call [`InputBuilder::events`]
/// to create the shared flag store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBuilder {
    mode: InputMode,
    debounce_ms: u32,
}

impl InputBuilder {
    /// Start building a polled input.
    ///
    /// Default debounce: 50 ms.
    pub const fn polling() -> Self {
        Self {
            mode: InputMode::Polling,
            debounce_ms: timing::POLL_DEBOUNCE_MS,
        }
    }

    /// Start building an edge-triggered input.
    ///
    /// Default debounce: 200 ms.
    pub const fn edge_triggered() -> Self {
        Self {
            mode: InputMode::EdgeTriggered,
            debounce_ms: timing::EDGE_DEBOUNCE_MS,
        }
    }

    /// Mode and window taken from a firmware profile.
    pub const fn from_profile(profile: &FirmwareProfile) -> Self {
        Self {
            mode: profile.input_mode,
            debounce_ms: profile.debounce_ms,
        }
    }

    /// Set debounce time in milliseconds.
    #[must_use]
    pub const fn debounce_ms(mut self, ms: u32) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Get the configured debounce time in milliseconds.
    pub const fn debounce(&self) -> u32 {
        self.debounce_ms
    }

    /// Get the configured detection mode.
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Fresh flag store using the configured window.
    ///
    /// Place the result in a `static` or `StaticCell` when edge tasks need it.
    pub const fn events(&self) -> ButtonEvents {
        ButtonEvents::new(self.debounce_ms)
    }
}
