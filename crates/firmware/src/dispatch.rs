//! Dispatch loop.
//!
//! One cooperative loop drives everything that touches the display and the
//! buzzer. Each iteration:
//!
//! 1. advances the input strategy (polling sweeps pins here, edge mode does
//!    nothing),
//! 2. polls the battery service and draws the battery screen on a new reading,
//! 3. drains the pending flags in [`Button::ALL`] order, drawing the button
//!    screen and playing the confirmation tone for each one that was set.
//!
//! Effector failures are logged and the loop carries on.

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;

use platform::{BatteryReading, Button, Clock, SoundEffector, StatusDisplay};

use crate::battery::BatteryService;
use crate::input::{ButtonEvents, InputStrategy};
use crate::log;
use crate::sound::play_confirm;
use crate::ui::{BatteryScreen, ButtonScreen};

/// What one iteration did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Iteration {
    /// Buttons whose pending flag was consumed, in service order.
    pub serviced: Vec<Button, { Button::COUNT }>,
    /// Battery reading taken this iteration, if any.
    pub battery: Option<BatteryReading>,
}

impl Iteration {
    /// Nothing happened.
    pub fn is_idle(&self) -> bool {
        self.serviced.is_empty() && self.battery.is_none()
    }
}

/// The firmware's main loop, generic over every peripheral it drives.
pub struct Dispatcher<'a, I, B, D, S, C> {
    input: I,
    battery: B,
    display: D,
    sound: S,
    clock: C,
    events: &'a ButtonEvents,
}

impl<'a, I, B, D, S, C> Dispatcher<'a, I, B, D, S, C>
where
    I: InputStrategy,
    B: BatteryService,
    D: StatusDisplay,
    S: SoundEffector,
    C: Clock,
{
    /// Assemble a dispatcher. `events` is shared with the edge tasks, if any.
    pub fn new(
        input: I,
        battery: B,
        display: D,
        sound: S,
        clock: C,
        events: &'a ButtonEvents,
    ) -> Self {
        Self {
            input,
            battery,
            display,
            sound,
            clock,
            events,
        }
    }

    /// The display being driven.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// The sound effector being driven.
    pub fn sound(&self) -> &S {
        &self.sound
    }

    /// The battery service.
    pub fn battery(&self) -> &B {
        &self.battery
    }

    /// Take the dispatcher apart.
    pub fn into_parts(self) -> (I, B, D, S) {
        (self.input, self.battery, self.display, self.sound)
    }

    /// Run one iteration.
    pub async fn run_iteration(&mut self) -> Iteration {
        let mut report = Iteration::default();

        self.input.advance(self.events, self.clock.now_ms());

        if let Some(reading) = self.battery.poll(self.clock.now_ms()).await {
            if BatteryScreen::render(&mut self.display, &reading).is_err() {
                log::warn!("battery screen draw failed");
            }
            self.present().await;
            report.battery = Some(reading);
        }

        for button in Button::ALL {
            if !self.events.take_and_clear(button) {
                continue;
            }
            log::debug!("servicing {}", button);
            if ButtonScreen::render(&mut self.display, button).is_err() {
                log::warn!("button screen draw failed");
            }
            self.present().await;
            if play_confirm(&mut self.sound).await.is_err() {
                log::warn!("confirmation tone failed");
            }
            // Capacity equals Button::COUNT and each button is visited once.
            let _ = report.serviced.push(button);
        }

        report
    }

    /// Loop forever with `idle_ms` between iterations.
    pub async fn run<W: DelayNs>(&mut self, mut delay: W, idle_ms: u32) -> ! {
        log::info!("dispatch loop running, idle {} ms", idle_ms);
        loop {
            let report = self.run_iteration().await;
            if !report.is_idle() {
                log::trace!("serviced {} buttons", report.serviced.len());
            }
            delay.delay_ms(idle_ms).await;
        }
    }

    async fn present(&mut self) {
        if self.display.present().await.is_err() {
            log::warn!("display update failed");
        }
    }
}
