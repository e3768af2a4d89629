//! Display abstraction layer

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;

/// Monochrome status display.
///
/// Drawing goes through [`DrawTarget`] into an off-screen buffer; nothing is
/// visible until [`StatusDisplay::present`] pushes the buffer to the panel.
/// `BinaryColor::On` is a lit pixel.
pub trait StatusDisplay: DrawTarget<Color = BinaryColor> {
    /// Error type for controller operations
    type DriverError: core::fmt::Debug;

    /// Bring the controller up. Failure here is fatal for the firmware.
    fn init(&mut self) -> impl core::future::Future<Output = Result<(), Self::DriverError>>;

    /// Push the off-screen buffer to the panel.
    fn present(&mut self) -> impl core::future::Future<Output = Result<(), Self::DriverError>>;

    /// Get display dimensions
    fn info(&self) -> DisplayInfo {
        let size = self.bounding_box().size;
        DisplayInfo {
            width: size.width,
            height: size.height,
        }
    }
}

/// Panel geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}
