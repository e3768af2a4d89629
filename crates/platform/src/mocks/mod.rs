//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests.
//!
//! Mocks that tests need to observe after handing them to the code under
//! test ([`MockClock`], [`MockOutputPin`]) share their state through `Rc`, so
//! keep a clone before moving one in.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::arithmetic_side_effects)]

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec;
use std::vec::Vec;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::digital::{ErrorKind, ErrorType, OutputPin};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;

use crate::*;

/// Manually driven millisecond clock.
///
/// Time is kept in microseconds so sub-millisecond delays accumulate.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    micros: Rc<Cell<u64>>,
}

impl MockClock {
    /// Clock starting at `ms`.
    pub fn starting_at(ms: u32) -> Self {
        let clock = Self::default();
        clock.set_ms(ms);
        clock
    }

    /// Jump to an absolute time.
    pub fn set_ms(&self, ms: u32) {
        self.micros.set(u64::from(ms) * 1_000);
    }

    /// Move forward by `ms`.
    pub fn advance_ms(&self, ms: u32) {
        self.advance_us(u64::from(ms) * 1_000);
    }

    /// Move forward by `us`.
    pub fn advance_us(&self, us: u64) {
        self.micros.set(self.micros.get() + us);
    }
}

impl Clock for MockClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Truncation is the counter wrap.
        (self.micros.get() / 1_000) as u32
    }
}

/// Delay that advances a [`MockClock`] instead of sleeping.
#[derive(Debug, Clone)]
pub struct MockDelay {
    clock: MockClock,
    log_ms: Rc<RefCell<Vec<u32>>>,
}

impl MockDelay {
    /// Delay bound to `clock`.
    pub fn new(clock: MockClock) -> Self {
        Self {
            clock,
            log_ms: Rc::default(),
        }
    }

    /// Every `delay_ms` call so far, in order.
    pub fn ms_calls(&self) -> Vec<u32> {
        self.log_ms.borrow().clone()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_us(u64::from(ns) / 1_000);
    }

    async fn delay_us(&mut self, us: u32) {
        self.clock.advance_us(u64::from(us));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.log_ms.borrow_mut().push(ms);
        self.clock.advance_ms(ms);
    }
}

/// Scripted raw button levels for the polling strategy.
///
/// Each `levels()` call pops the next frame; once the script is exhausted the
/// last frame repeats.
#[derive(Debug)]
pub struct MockButtons {
    frames: VecDeque<ButtonLevels>,
    current: ButtonLevels,
}

impl MockButtons {
    /// All buttons released, no script.
    pub fn new() -> Self {
        Self {
            frames: VecDeque::new(),
            current: ButtonLevels::RELEASED,
        }
    }

    /// Queue a frame.
    pub fn push(&mut self, levels: ButtonLevels) {
        self.frames.push_back(levels);
    }

    /// Queue a frame with only `button` pressed.
    pub fn push_pressed(&mut self, button: Button) {
        self.push(ButtonLevels::RELEASED.with(button, PinState::Low));
    }

    /// Queue an all-released frame.
    pub fn push_released(&mut self) {
        self.push(ButtonLevels::RELEASED);
    }
}

impl Default for MockButtons {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonPins for MockButtons {
    fn levels(&mut self) -> ButtonLevels {
        if let Some(next) = self.frames.pop_front() {
            self.current = next;
        }
        self.current
    }
}

/// Error produced by the mock ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockAdcError {
    /// Scripted failure.
    Fault,
    /// Read while the gating enable line was low.
    Disabled,
}

/// Scripted ADC channel.
///
/// Returns the queued results in order, then repeats the last code. When
/// gated, a read with the gate pin low fails with [`MockAdcError::Disabled`].
#[derive(Debug)]
pub struct MockAdc {
    results: VecDeque<Result<u16, MockAdcError>>,
    fallback: u16,
    gate: Option<MockOutputPin>,
    reads: usize,
}

impl MockAdc {
    /// ADC that always returns `code`.
    pub fn constant(code: u16) -> Self {
        Self {
            results: VecDeque::new(),
            fallback: code,
            gate: None,
            reads: 0,
        }
    }

    /// ADC returning `results` in order.
    pub fn scripted(results: impl IntoIterator<Item = Result<u16, MockAdcError>>) -> Self {
        let results: VecDeque<_> = results.into_iter().collect();
        let fallback = results
            .iter()
            .rev()
            .find_map(|r| r.as_ref().ok().copied())
            .unwrap_or_default();
        Self {
            results,
            fallback,
            gate: None,
            reads: 0,
        }
    }

    /// Reject reads while `pin` is low.
    #[must_use]
    pub fn gated_by(mut self, pin: MockOutputPin) -> Self {
        self.gate = Some(pin);
        self
    }

    /// Conversions attempted so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl AnalogInput for MockAdc {
    type Error = MockAdcError;

    async fn read(&mut self) -> Result<u16, Self::Error> {
        self.reads += 1;
        if let Some(gate) = &self.gate {
            if !gate.is_high() {
                return Err(MockAdcError::Disabled);
            }
        }
        self.results.pop_front().unwrap_or(Ok(self.fallback))
    }
}

/// Output pin that records every level it was driven to.
#[derive(Debug, Clone, Default)]
pub struct MockOutputPin {
    history: Rc<RefCell<Vec<PinState>>>,
    fail: Rc<Cell<bool>>,
}

impl MockOutputPin {
    /// New pin with no history (treated as low).
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail.
    pub fn set_failing(&self, fail: bool) {
        self.fail.set(fail);
    }

    /// Levels written so far.
    pub fn history(&self) -> Vec<PinState> {
        self.history.borrow().clone()
    }

    /// Whether the last written level is high.
    pub fn is_high(&self) -> bool {
        self.history.borrow().last() == Some(&PinState::High)
    }

    /// Number of low-to-high transitions.
    pub fn rising_edges(&self) -> usize {
        let history = self.history.borrow();
        let mut previous = PinState::Low;
        let mut count = 0;
        for &level in history.iter() {
            if previous == PinState::Low && level == PinState::High {
                count += 1;
            }
            previous = level;
        }
        count
    }

    fn write(&mut self, level: PinState) -> Result<(), ErrorKind> {
        if self.fail.get() {
            return Err(ErrorKind::Other);
        }
        self.history.borrow_mut().push(level);
        Ok(())
    }
}

impl ErrorType for MockOutputPin {
    type Error = ErrorKind;
}

impl OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(PinState::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(PinState::High)
    }
}

/// Interrupt line replaying falling edges at scripted times.
///
/// Every wait moves the shared clock to the next scripted timestamp and
/// returns. When the script runs out the wait fails, which ends an edge loop.
#[derive(Debug)]
pub struct MockEdgePin {
    clock: MockClock,
    edges_ms: VecDeque<u32>,
}

impl MockEdgePin {
    /// Pin firing at each of `edges_ms`.
    pub fn new(clock: MockClock, edges_ms: impl IntoIterator<Item = u32>) -> Self {
        Self {
            clock,
            edges_ms: edges_ms.into_iter().collect(),
        }
    }

    fn next_edge(&mut self) -> Result<(), ErrorKind> {
        let at = self.edges_ms.pop_front().ok_or(ErrorKind::Other)?;
        self.clock.set_ms(at);
        Ok(())
    }
}

impl ErrorType for MockEdgePin {
    type Error = ErrorKind;
}

impl Wait for MockEdgePin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.next_edge()
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.next_edge()
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge()
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge()
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge()
    }
}

/// Error produced by the mock display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockDisplayError {
    /// Controller did not acknowledge.
    Nack,
}

/// Monochrome in-memory display.
///
/// Drawing lands in a working buffer; [`StatusDisplay::present`] copies it to
/// the visible frame.
#[derive(Debug)]
pub struct MockDisplay {
    width: u32,
    height: u32,
    buffer: Vec<bool>,
    visible: Vec<bool>,
    init_count: usize,
    present_count: usize,
    fail_init: bool,
    fail_present: bool,
}

impl MockDisplay {
    /// Create new mock display
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width * height) as usize;
        Self {
            width,
            height,
            buffer: vec![false; len],
            visible: vec![false; len],
            init_count: 0,
            present_count: 0,
            fail_init: false,
            fail_present: false,
        }
    }

    /// 128x64 panel matching the board.
    pub fn oled() -> Self {
        Self::new(128, 64)
    }

    /// Make `init` fail.
    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make `present` fail.
    pub fn set_failing_present(&mut self, fail: bool) {
        self.fail_present = fail;
    }

    /// Successful and failed `init` calls.
    pub fn init_count(&self) -> usize {
        self.init_count
    }

    /// Successful `present` calls.
    pub fn present_count(&self) -> usize {
        self.present_count
    }

    /// Lit pixels in the working buffer.
    pub fn lit_pixels(&self) -> usize {
        self.buffer.iter().filter(|&&on| on).count()
    }

    /// Lit pixels on the visible frame.
    pub fn visible_lit_pixels(&self) -> usize {
        self.visible.iter().filter(|&&on| on).count()
    }

    /// Visible pixel at (`x`, `y`); out of bounds reads as off.
    pub fn visible_pixel(&self, x: u32, y: u32) -> bool {
        self.index(x, y)
            .and_then(|i| self.visible.get(i).copied())
            .unwrap_or(false)
    }

    /// Whether any visible pixel inside the rectangle is lit.
    pub fn visible_region_lit(&self, area: embedded_graphics::primitives::Rectangle) -> bool {
        area.points().any(|p| {
            u32::try_from(p.x)
                .ok()
                .zip(u32::try_from(p.y).ok())
                .is_some_and(|(x, y)| self.visible_pixel(x, y))
        })
    }

    /// Copy of the visible frame, row-major.
    pub fn visible_frame(&self) -> Vec<bool> {
        self.visible.clone()
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }
}

impl DrawTarget for MockDisplay {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if let Some(slot) = self.index(x, y).and_then(|i| self.buffer.get_mut(i)) {
                *slot = color.is_on();
            }
        }
        Ok(())
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl StatusDisplay for MockDisplay {
    type DriverError = MockDisplayError;

    async fn init(&mut self) -> Result<(), Self::DriverError> {
        self.init_count += 1;
        if self.fail_init {
            return Err(MockDisplayError::Nack);
        }
        Ok(())
    }

    async fn present(&mut self) -> Result<(), Self::DriverError> {
        if self.fail_present {
            return Err(MockDisplayError::Nack);
        }
        self.visible.clone_from(&self.buffer);
        self.present_count += 1;
        Ok(())
    }
}

/// Error produced by the mock sound effector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSoundError;

/// Sound effector that records every tone.
///
/// With a clock attached, each tone advances it by its duration.
#[derive(Debug, Default)]
pub struct MockSound {
    notes: Vec<Note>,
    clock: Option<MockClock>,
    fail: bool,
}

impl MockSound {
    /// Silent recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder that spends tone durations on `clock`.
    pub fn with_clock(clock: MockClock) -> Self {
        Self {
            clock: Some(clock),
            ..Self::default()
        }
    }

    /// Make every tone fail.
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Tones played so far.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

impl SoundEffector for MockSound {
    type Error = MockSoundError;

    async fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockSoundError);
        }
        self.notes.push(Note::new(frequency_hz, duration_ms));
        if let Some(clock) = &self.clock {
            clock.advance_ms(duration_ms);
        }
        Ok(())
    }
}
