//! Embassy glue for the platform traits.
//!
//! Thin adapters that let the board's embassy-stm32 peripherals stand in for
//! [`platform::Clock`], [`platform::AnalogInput`] and
//! [`platform::ButtonPins`]. Hardware builds only.

use embassy_stm32::adc::{Adc, AdcPin, Instance as AdcInstance};
use embassy_stm32::gpio::{AnyPin, Input};
use embassy_time::Instant;

use platform::{AnalogInput, Button, ButtonLevels, ButtonPins, Clock, PinState};

/// Millisecond clock backed by the embassy time driver (TIM2).
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        // Truncation to u32 is the millisecond counter wrap.
        Instant::now().as_millis() as u32
    }
}

/// One ADC1 channel.
pub struct EmbassyAdc<'d, T: AdcInstance, P: AdcPin<T>> {
    adc: Adc<'d, T>,
    pin: P,
}

impl<'d, T: AdcInstance, P: AdcPin<T>> EmbassyAdc<'d, T, P> {
    /// Bind `pin` to `adc`.
    pub fn new(adc: Adc<'d, T>, pin: P) -> Self {
        Self { adc, pin }
    }
}

impl<T: AdcInstance, P: AdcPin<T>> AnalogInput for EmbassyAdc<'_, T, P> {
    type Error = core::convert::Infallible;

    async fn read(&mut self) -> Result<u16, Self::Error> {
        Ok(self.adc.read(&mut self.pin).await)
    }
}

/// The four button inputs read as plain GPIO (polling profile).
pub struct HardwareButtons {
    pins: [Input<'static, AnyPin>; Button::COUNT],
}

impl HardwareButtons {
    /// Pins in service order: OK (PA3), NEXT (PA2), PREV (PA1), CANCEL (PA0).
    pub fn new(pins: [Input<'static, AnyPin>; Button::COUNT]) -> Self {
        Self { pins }
    }
}

impl ButtonPins for HardwareButtons {
    fn levels(&mut self) -> ButtonLevels {
        let [ok, next, prev, cancel] = &self.pins;
        ButtonLevels::new([
            PinState::from(ok.is_high()),
            PinState::from(next.is_high()),
            PinState::from(prev.is_high()),
            PinState::from(cancel.is_high()),
        ])
    }
}
