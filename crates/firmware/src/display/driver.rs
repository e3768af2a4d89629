//! SSD1306 Hardware Driver
//!
//! Buffered driver for the 128×64 SSD1306 OLED on the LoadScale front panel.
//!
//! # Wiring (STM32F103C8)
//!
//! | Signal | STM32 pin        | Direction      |
//! |--------|------------------|----------------|
//! | SCL    | PB10 (I2C2_SCL)  | Host → Display |
//! | SDA    | PB11 (I2C2_SDA)  | Bidirectional  |
//!
//! 7-bit address 0x3C. Every I2C write starts with a control byte: 0x00 for a
//! command stream, 0x40 for display RAM data.
//!
//! # Memory layout
//!
//! GDDRAM is organised as 8 pages of 8 pixel rows. Each byte is one column
//! of a page, LSB at the top. The driver mirrors that layout in a 1 KiB
//! framebuffer, so a flush is a straight copy in horizontal addressing mode.

// Geometry constants are u32 (matching embedded-graphics) but SSD1306 address
// registers are u8. WIDTH=128 and PAGES=8 both fit. Pixel coordinates are
// non-negative after the bounds check, so casting to usize is safe.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::arithmetic_side_effects
)]

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::i2c::I2c;
use thiserror_no_std::Error;

use platform::config::pins::OLED_I2C_ADDRESS;
use platform::StatusDisplay;

use super::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of 8-row pages.
pub const PAGES: usize = DISPLAY_HEIGHT as usize / 8;

/// Framebuffer size: 128 columns × 8 pages = 1024 bytes.
pub const FRAMEBUFFER_SIZE: usize = DISPLAY_WIDTH as usize * PAGES;

/// Control byte prefixing a command stream.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte prefixing display RAM data.
pub const CONTROL_DATA: u8 = 0x40;

/// Display RAM bytes sent per I2C write during a flush.
pub const FLUSH_CHUNK: usize = 32;

// ---------------------------------------------------------------------------
// Command enum
// ---------------------------------------------------------------------------

/// SSD1306 command codes used by this driver.
#[repr(u8)]
#[derive(Debug, Clone, Copy)]
pub enum Command {
    /// Memory addressing mode: 1 argument (0x00 = horizontal).
    MemoryMode = 0x20,
    /// Column address range: 2 arguments (start, end).
    ColumnAddress = 0x21,
    /// Page address range: 2 arguments (start, end).
    PageAddress = 0x22,
    /// Stop horizontal scroll.
    DeactivateScroll = 0x2E,
    /// Display start line 0.
    StartLine = 0x40,
    /// Contrast: 1 argument.
    Contrast = 0x81,
    /// Charge pump: 1 argument (0x14 = enable).
    ChargePump = 0x8D,
    /// Segment remap: column 127 → SEG0.
    SegmentRemap = 0xA1,
    /// Output follows RAM content.
    ResumeFromRam = 0xA4,
    /// Normal (non-inverted) display.
    NormalDisplay = 0xA6,
    /// Multiplex ratio: 1 argument (rows - 1).
    Multiplex = 0xA8,
    /// Panel off (sleep).
    DisplayOff = 0xAE,
    /// Panel on.
    DisplayOn = 0xAF,
    /// COM scan direction: remapped (COM[N-1] → COM0).
    ComScanDec = 0xC8,
    /// Vertical display offset: 1 argument.
    DisplayOffset = 0xD3,
    /// Clock divide ratio / oscillator: 1 argument.
    ClockDiv = 0xD5,
    /// Pre-charge period: 1 argument.
    PreCharge = 0xD9,
    /// COM pin hardware configuration: 1 argument.
    ComPins = 0xDA,
    /// VCOMH deselect level: 1 argument.
    VcomDetect = 0xDB,
}

/// Power-up sequence for a 128×64 panel on the internal charge pump.
pub const INIT_SEQUENCE: &[u8] = &[
    Command::DisplayOff as u8,
    Command::ClockDiv as u8,
    0x80,
    Command::Multiplex as u8,
    0x3F,
    Command::DisplayOffset as u8,
    0x00,
    Command::StartLine as u8,
    Command::ChargePump as u8,
    0x14,
    Command::MemoryMode as u8,
    0x00,
    Command::SegmentRemap as u8,
    Command::ComScanDec as u8,
    Command::ComPins as u8,
    0x12,
    Command::Contrast as u8,
    0xCF,
    Command::PreCharge as u8,
    0xF1,
    Command::VcomDetect as u8,
    0x40,
    Command::ResumeFromRam as u8,
    Command::NormalDisplay as u8,
    Command::DeactivateScroll as u8,
    Command::DisplayOn as u8,
];

// ---------------------------------------------------------------------------
// Driver struct
// ---------------------------------------------------------------------------

/// SSD1306 display driver.
///
/// Generic over any blocking [`embedded_hal::i2c::I2c`] bus. Drawing goes to
/// the internal framebuffer; [`StatusDisplay::present`] pushes it to GDDRAM.
///
/// On the STM32F103 supply an `embassy_stm32::i2c::I2c` on I2C2. In host tests
/// supply `embedded_hal_mock::eh1::i2c::Mock`.
pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
    /// Page-ordered 1bpp framebuffer, 1 = lit.
    framebuffer: [u8; FRAMEBUFFER_SIZE],
}

impl<I2C: I2c> Ssd1306<I2C> {
    /// Create a driver at the board's address (0x3C) with a blank buffer.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, OLED_I2C_ADDRESS)
    }

    /// Create a driver at a custom 7-bit address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            framebuffer: [0; FRAMEBUFFER_SIZE],
        }
    }

    /// Raw framebuffer, page-ordered.
    pub fn framebuffer(&self) -> &[u8; FRAMEBUFFER_SIZE] {
        &self.framebuffer
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    /// Send a command stream in one write.
    fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        let mut buf: heapless::Vec<u8, 32> = heapless::Vec::new();
        buf.push(CONTROL_COMMAND)
            .map_err(|_| DisplayError::InvalidBuffer)?;
        buf.extend_from_slice(commands)
            .map_err(|_| DisplayError::InvalidBuffer)?;
        self.i2c
            .write(self.address, &buf)
            .map_err(|_| DisplayError::Communication)
    }

    /// Send all of display RAM, `FLUSH_CHUNK` bytes per write.
    fn flush_framebuffer(&mut self) -> Result<(), DisplayError> {
        let last_column = (DISPLAY_WIDTH - 1) as u8;
        let last_page = (PAGES - 1) as u8;
        self.send_commands(&[
            Command::ColumnAddress as u8,
            0,
            last_column,
            Command::PageAddress as u8,
            0,
            last_page,
        ])?;

        // Byte 0 stays the data control byte; the rest is refilled per chunk.
        let mut buf = [CONTROL_DATA; FLUSH_CHUNK + 1];
        for chunk in self.framebuffer.chunks(FLUSH_CHUNK) {
            let len = chunk.len() + 1;
            let Some(dst) = buf.get_mut(1..len) else {
                return Err(DisplayError::InvalidBuffer);
            };
            dst.copy_from_slice(chunk);
            let Some(frame) = buf.get(..len) else {
                return Err(DisplayError::InvalidBuffer);
            };
            self.i2c
                .write(self.address, frame)
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// platform::StatusDisplay implementation
// ---------------------------------------------------------------------------

impl<I2C: I2c> StatusDisplay for Ssd1306<I2C> {
    type DriverError = DisplayError;

    async fn init(&mut self) -> Result<(), Self::DriverError> {
        self.send_commands(INIT_SEQUENCE)
    }

    async fn present(&mut self) -> Result<(), Self::DriverError> {
        self.flush_framebuffer()
    }
}

// ---------------------------------------------------------------------------
// DrawTarget
// ---------------------------------------------------------------------------

impl<I2C: I2c> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    /// Write pixels into the page-ordered framebuffer.
    ///
    /// `BinaryColor::On` lights the pixel (bit = 1).
    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0
                || point.y < 0
                || point.x >= DISPLAY_WIDTH as i32
                || point.y >= DISPLAY_HEIGHT as i32
            {
                continue;
            }
            let x = point.x as usize;
            let y = point.y as usize;
            // x < 128 and y / 8 < 8, so the index is < 1024.
            let index = (y / 8) * DISPLAY_WIDTH as usize + x;
            let mask = 1u8 << (y % 8);
            if let Some(byte) = self.framebuffer.get_mut(index) {
                match color {
                    BinaryColor::On => *byte |= mask,
                    BinaryColor::Off => *byte &= !mask,
                }
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let fill = if color.is_on() { 0xFF } else { 0x00 };
        self.framebuffer.fill(fill);
        Ok(())
    }
}

impl<I2C: I2c> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors returned by the SSD1306 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// I2C transfer failed or was not acknowledged.
    #[error("I2C communication error")]
    Communication,
    /// A command or data frame did not fit its buffer.
    #[error("Invalid buffer size")]
    InvalidBuffer,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x3C;

    fn command_write(commands: &[u8]) -> I2cTransaction {
        let mut bytes = vec![CONTROL_COMMAND];
        bytes.extend_from_slice(commands);
        I2cTransaction::write(ADDR, bytes)
    }

    fn flush_expectations(framebuffer: &[u8]) -> Vec<I2cTransaction> {
        let mut txns = vec![command_write(&[0x21, 0x00, 0x7F, 0x22, 0x00, 0x07])];
        for chunk in framebuffer.chunks(FLUSH_CHUNK) {
            let mut bytes = vec![CONTROL_DATA];
            bytes.extend_from_slice(chunk);
            txns.push(I2cTransaction::write(ADDR, bytes));
        }
        txns
    }

    #[test]
    fn test_framebuffer_size() {
        assert_eq!(FRAMEBUFFER_SIZE, 1024);
        assert_eq!(PAGES, 8);
        assert_eq!(FRAMEBUFFER_SIZE % FLUSH_CHUNK, 0);
    }

    #[tokio::test]
    async fn test_init_sequence() {
        let expected = [command_write(&[
            0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x00, 0xA1, 0xC8,
            0xDA, 0x12, 0x81, 0xCF, 0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0x2E, 0xAF,
        ])];
        let mut i2c = I2cMock::new(&expected);
        let mut drv = Ssd1306::new(i2c.clone());
        drv.init().await.expect("init() must succeed");
        i2c.done();
    }

    #[tokio::test]
    async fn test_init_nack_is_error() {
        let expected =
            [command_write(INIT_SEQUENCE).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expected);
        let mut drv = Ssd1306::new(i2c.clone());
        assert_eq!(drv.init().await, Err(DisplayError::Communication));
        i2c.done();
    }

    #[test]
    fn test_pixel_lands_in_page_byte() {
        let mut i2c = I2cMock::new(&[]);
        let mut drv = Ssd1306::new(i2c.clone());

        Pixel(Point::new(5, 0), BinaryColor::On).draw(&mut drv).unwrap();
        Pixel(Point::new(5, 9), BinaryColor::On).draw(&mut drv).unwrap();
        Pixel(Point::new(127, 63), BinaryColor::On).draw(&mut drv).unwrap();

        let fb = drv.framebuffer();
        assert_eq!(fb[5], 0b0000_0001, "row 0 is bit 0 of page 0");
        assert_eq!(fb[128 + 5], 0b0000_0010, "row 9 is bit 1 of page 1");
        assert_eq!(fb[FRAMEBUFFER_SIZE - 1], 0b1000_0000);
        i2c.done();
    }

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let mut i2c = I2cMock::new(&[]);
        let mut drv = Ssd1306::new(i2c.clone());

        Pixel(Point::new(-1, 0), BinaryColor::On).draw(&mut drv).unwrap();
        Pixel(Point::new(128, 0), BinaryColor::On).draw(&mut drv).unwrap();
        Pixel(Point::new(0, 64), BinaryColor::On).draw(&mut drv).unwrap();

        assert!(drv.framebuffer().iter().all(|&b| b == 0));
        i2c.done();
    }

    #[test]
    fn test_off_clears_bit() {
        let mut i2c = I2cMock::new(&[]);
        let mut drv = Ssd1306::new(i2c.clone());
        drv.clear(BinaryColor::On).unwrap();
        Pixel(Point::new(0, 3), BinaryColor::Off).draw(&mut drv).unwrap();
        assert_eq!(drv.framebuffer()[0], 0b1111_0111);
        i2c.done();
    }

    #[tokio::test]
    async fn test_present_streams_whole_buffer() {
        let mut reference = [0u8; FRAMEBUFFER_SIZE];
        // 8×8 filled square in the top-left corner: columns 0..8 of page 0.
        reference[..8].fill(0xFF);

        let mut i2c = I2cMock::new(&flush_expectations(&reference));
        let mut drv = Ssd1306::new(i2c.clone());
        Rectangle::new(Point::zero(), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(&mut drv)
            .unwrap();
        drv.present().await.expect("present() must succeed");
        i2c.done();
    }

    #[test]
    fn test_driver_size() {
        let mut i2c = I2cMock::new(&[]);
        let drv = Ssd1306::new(i2c.clone());
        assert_eq!(drv.size(), Size::new(128, 64));
        assert_eq!(
            drv.info(),
            platform::DisplayInfo {
                width: 128,
                height: 64
            }
        );
        i2c.done();
    }

    #[test]
    fn test_display_error_format() {
        use std::string::ToString;
        assert_eq!(
            DisplayError::Communication.to_string(),
            "I2C communication error"
        );
        assert_eq!(DisplayError::InvalidBuffer.to_string(), "Invalid buffer size");
    }
}
