//! Button identifiers and raw button level sampling.

use crate::gpio::PinState;

/// Physical buttons on the front panel.
///
/// All four are wired active-low with the MCU's internal pull-up, so an idle
/// button reads [`PinState::High`] and a pressed one reads [`PinState::Low`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Confirm / select.
    Ok,
    /// Move to the next item.
    Next,
    /// Move to the previous item.
    Prev,
    /// Back out / abort.
    Cancel,
}

impl Button {
    /// Number of buttons.
    pub const COUNT: usize = 4;

    /// Every button, in the order the dispatch loop services them.
    pub const ALL: [Button; Button::COUNT] = [Button::Ok, Button::Next, Button::Prev, Button::Cancel];

    /// Slot index in per-button tables (`0..COUNT`, service order).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Ok => 0,
            Self::Next => 1,
            Self::Prev => 2,
            Self::Cancel => 3,
        }
    }

    /// Label shown on the status display.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Next => "NEXT",
            Self::Prev => "PREV",
            Self::Cancel => "CANCEL",
        }
    }
}

impl core::fmt::Display for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw levels of all four buttons captured in one read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels([PinState; Button::COUNT]);

impl ButtonLevels {
    /// Every button released (pull-up idle level).
    pub const RELEASED: Self = Self([PinState::High; Button::COUNT]);

    /// Build from levels given in service order (OK, NEXT, PREV, CANCEL).
    #[must_use]
    pub const fn new(levels: [PinState; Button::COUNT]) -> Self {
        Self(levels)
    }

    /// Level of one button.
    #[must_use]
    pub fn level(&self, button: Button) -> PinState {
        // index() is always < COUNT, the array length.
        #[allow(clippy::indexing_slicing)]
        self.0[button.index()]
    }

    /// Copy with one button's level replaced.
    #[must_use]
    pub fn with(mut self, button: Button, level: PinState) -> Self {
        #[allow(clippy::indexing_slicing)]
        {
            self.0[button.index()] = level;
        }
        self
    }
}

impl Default for ButtonLevels {
    fn default() -> Self {
        Self::RELEASED
    }
}

/// Source of raw button levels for the polling input strategy.
///
/// Implementations read the four GPIO inputs back to back. Reads cannot fail
/// on the target MCU, so the trait returns levels directly.
pub trait ButtonPins {
    /// Sample the current raw level of every button.
    fn levels(&mut self) -> ButtonLevels;
}
