//! Emulator Display Driver
//!
//! Wraps `embedded-graphics-simulator` for the desktop simulator. Drawing
//! lands in a [`SimulatorDisplay`]; `present` pushes it to an SDL window
//! themed like the blue OLED module. A headless variant skips the window so
//! tests can inspect frames through [`EmulatorDisplay::output_image`].

use embedded_graphics::pixelcolor::{BinaryColor, Rgb888};
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{
    BinaryColorTheme, OutputImage, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent,
    Window,
};
use thiserror_no_std::Error;

use platform::config::APP_NAME;
use platform::StatusDisplay;

use super::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Window upscaling; 128×64 is tiny on a desktop monitor.
const WINDOW_SCALE: u32 = 4;

const THEME: BinaryColorTheme = BinaryColorTheme::OledBlue;

/// Simulated 128×64 monochrome OLED.
#[allow(clippy::module_name_repetitions)] // used as firmware::EmulatorDisplay
pub struct EmulatorDisplay {
    display: SimulatorDisplay<BinaryColor>,
    window: Option<Window>,
    frames: usize,
}

impl EmulatorDisplay {
    /// Display backed by an SDL window, opened on the first `present`.
    #[must_use]
    pub fn new() -> Self {
        let settings = OutputSettingsBuilder::new()
            .theme(THEME)
            .scale(WINDOW_SCALE)
            .build();
        Self {
            display: SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
            window: Some(Window::new(APP_NAME, &settings)),
            frames: 0,
        }
    }

    /// Display without a window (tests, CI).
    #[must_use]
    pub fn headless() -> Self {
        Self {
            display: SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)),
            window: None,
            frames: 0,
        }
    }

    /// Frames presented so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Underlying simulator buffer.
    pub fn simulator(&self) -> &SimulatorDisplay<BinaryColor> {
        &self.display
    }

    /// Current buffer rendered with the OLED theme, one image pixel per
    /// display pixel.
    pub fn output_image(&self) -> OutputImage<Rgb888> {
        let settings = OutputSettingsBuilder::new().theme(THEME).build();
        self.display.to_rgb_output_image(&settings)
    }
}

impl Default for EmulatorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusDisplay for EmulatorDisplay {
    type DriverError = EmulatorError;

    async fn init(&mut self) -> Result<(), Self::DriverError> {
        tracing::debug!(
            width = DISPLAY_WIDTH,
            height = DISPLAY_HEIGHT,
            headless = self.window.is_none(),
            "Initializing emulator display"
        );
        self.display
            .clear(BinaryColor::Off)
            .map_err(|_| EmulatorError::DrawFailed)
    }

    async fn present(&mut self) -> Result<(), Self::DriverError> {
        if let Some(window) = self.window.as_mut() {
            window.update(&self.display);
            if window.events().any(|event| matches!(event, SimulatorEvent::Quit)) {
                tracing::info!("Emulator window closed");
                return Err(EmulatorError::WindowClosed);
            }
        }
        self.frames = self.frames.saturating_add(1);
        tracing::trace!(frame = self.frames, "Emulator: frame presented");
        Ok(())
    }
}

impl DrawTarget for EmulatorDisplay {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.display.draw_iter(pixels)
    }
}

impl OriginDimensions for EmulatorDisplay {
    fn size(&self) -> Size {
        self.display.size()
    }
}

/// Emulator display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EmulatorError {
    /// Drawing into the simulator buffer failed
    #[error("Draw operation failed")]
    DrawFailed,
    /// The user closed the simulator window
    #[error("Emulator window closed")]
    WindowClosed,
}
