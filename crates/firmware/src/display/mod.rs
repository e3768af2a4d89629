//! Display drivers for the LoadScale front panel
//!
//! The board carries a 128×64 monochrome SSD1306 OLED on I2C2. The hardware
//! driver is always compiled (no hardware gate) so `cargo test` exercises it
//! on the host against `embedded-hal-mock`. The emulator shows the same
//! frames in an `embedded-graphics-simulator` window for the desktop
//! simulator.

pub mod driver;

#[cfg(feature = "emulator")]
pub mod emulator;

pub use driver::{DisplayError, Ssd1306, FRAMEBUFFER_SIZE};

#[cfg(feature = "emulator")]
pub use emulator::{EmulatorDisplay, EmulatorError};

/// Display width in pixels (SSD1306 128×64)
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels (SSD1306 128×64)
pub const DISPLAY_HEIGHT: u32 = 64;
