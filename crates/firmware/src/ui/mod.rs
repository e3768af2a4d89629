//! User Interface Module
//!
//! The three screens of the status display. Each `render` clears the target
//! and draws a full frame into the off-screen buffer; the caller presents it.

// Screen coordinates are small constants on a 128×64 panel; the glyph fill
// width is at most 56 px. None of this arithmetic can overflow i32/u32.
#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_wrap)]

use core::fmt::Write as _;

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use platform::config::{APP_NAME, SPLASH_GREETING};
use platform::{BatteryReading, Button};

/// Small text style (6×10).
fn small() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_6X10, BinaryColor::On)
}

/// Large text style (10×20).
fn large() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyle::new(&FONT_10X20, BinaryColor::On)
}

/// Draw `text` with its top-left corner at `at`.
fn text_at<D>(
    display: &mut D,
    text: &str,
    at: Point,
    style: MonoTextStyle<'static, BinaryColor>,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    Text::with_baseline(text, at, style, Baseline::Top)
        .draw(display)
        .map(|_| ())
}

/// Splash screen - shown on boot
pub struct SplashScreen;

impl SplashScreen {
    /// Greeting in the small font at (10, 2), product name in the large font
    /// at (10, 16).
    pub fn render<D>(display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        display.clear(BinaryColor::Off)?;
        text_at(display, SPLASH_GREETING, Point::new(10, 2), small())?;
        text_at(display, APP_NAME, Point::new(10, 16), large())
    }
}

/// Shows which button was pressed last.
pub struct ButtonScreen;

impl ButtonScreen {
    /// Origin of the "Button:" heading.
    pub const HEADING_AT: Point = Point::new(0, 0);

    /// Origin of the button name, one large line below the heading.
    pub const NAME_AT: Point = Point::new(0, 20);

    /// "Button:" and the button name, large font, from the top-left corner.
    pub fn render<D>(display: &mut D, button: Button) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        display.clear(BinaryColor::Off)?;
        text_at(display, "Button:", Self::HEADING_AT, large())?;
        text_at(display, button.name(), Self::NAME_AT, large())
    }
}

/// Battery state of charge.
pub struct BatteryScreen;

impl BatteryScreen {
    /// Battery glyph body: outline, terminal nub on the right.
    pub const BODY: Rectangle = Rectangle::new(Point::new(0, 14), Size::new(60, 24));

    /// Terminal nub.
    pub const NUB: Rectangle = Rectangle::new(Point::new(60, 20), Size::new(4, 12));

    /// Widest possible fill inside the outline (2 px inset).
    pub const FILL_MAX_WIDTH: u32 = 56;

    /// Width of the fill bar for `percent`.
    pub fn fill_width(percent: u8) -> u32 {
        let percent = u32::from(percent.min(100));
        #[allow(clippy::integer_division)]
        let width = Self::FILL_MAX_WIDTH * percent / 100;
        width
    }

    /// "Battery" label, glyph with proportional fill, percent and voltage.
    pub fn render<D>(display: &mut D, reading: &BatteryReading) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let percent = reading.percent.get();
        display.clear(BinaryColor::Off)?;
        text_at(display, "Battery", Point::new(0, 0), small())?;

        Self::BODY
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(display)?;
        Self::NUB
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(display)?;
        let fill = Self::fill_width(percent);
        if fill > 0 {
            Rectangle::new(Self::BODY.top_left + Point::new(2, 2), Size::new(fill, 20))
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(display)?;
        }

        // "100%" and "99.99 V" fit; a failed write just truncates the label.
        let mut pct: heapless::String<8> = heapless::String::new();
        let _ = write!(pct, "{percent}%");
        text_at(display, &pct, Point::new(72, 16), large())?;

        let mut volts: heapless::String<12> = heapless::String::new();
        let _ = write!(volts, "{:.2} V", reading.volts);
        text_at(display, &volts, Point::new(0, 46), small())
    }
}
