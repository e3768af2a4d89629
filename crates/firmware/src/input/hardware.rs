//! Hardware edge input: one EXTI falling-edge loop per button.
//!
//! # Pin assignments
//!
//! | Button | MCU pin | EXTI line | Notes                        |
//! |--------|---------|-----------|------------------------------|
//! | OK     | PA3     | EXTI3     | Active-low, internal pull-up |
//! | NEXT   | PA2     | EXTI2     | Active-low, internal pull-up |
//! | PREV   | PA1     | EXTI1     | Active-low, internal pull-up |
//! | CANCEL | PA0     | EXTI0     | Active-low, internal pull-up |
//!
//! # Architecture
//!
//! A single embassy task owns the four [`ExtiInput`]s and joins their
//! [`edge_loop`]s. Accepted presses land in the shared `'static`
//! [`ButtonEvents`]; the dispatch loop in `main` drains it. The task only
//! touches atomics, so it never blocks the dispatch loop.

use embassy_executor::{SpawnError, Spawner};
use embassy_futures::join::join4;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::AnyPin;

use platform::Button;

use super::{edge_loop, ButtonEvents};
use crate::hal::EmbassyClock;

/// EXTI inputs in service order: OK, NEXT, PREV, CANCEL.
pub type EdgePins = [ExtiInput<'static, AnyPin>; Button::COUNT];

/// Spawn the edge input task.
///
/// Call this once from the embassy `main` function. The task owns the button
/// pins for the lifetime of the program.
pub fn spawn_edge_task(
    spawner: &Spawner,
    pins: EdgePins,
    events: &'static ButtonEvents,
) -> Result<(), SpawnError> {
    spawner.spawn(edge_task(pins, events))
}

/// Embassy task joining the four per-button edge loops.
#[embassy_executor::task]
async fn edge_task(pins: EdgePins, events: &'static ButtonEvents) {
    let clock = EmbassyClock;
    let [mut ok, mut next, mut prev, mut cancel] = pins;

    join4(
        edge_loop(&mut ok, Button::Ok, events, &clock),
        edge_loop(&mut next, Button::Next, events, &clock),
        edge_loop(&mut prev, Button::Prev, events, &clock),
        edge_loop(&mut cancel, Button::Cancel, events, &clock),
    )
    .await;
}
