//! LoadScale Desktop Simulator
//!
//! Runs the real boot sequence and dispatch loop on the host. The OLED is
//! shown in an SDL window, the buzzer is logged, and a short script of
//! bouncy button presses is fed through the edge-triggered input path.
//!
//! Run with: cargo run --example desktop_sim --features emulator
//! Set `RUST_LOG=debug` to see every accepted and debounced edge.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use embedded_hal::digital::{ErrorKind, ErrorType};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::digital::Wait;
use tracing_subscriber::EnvFilter;

use firmware::battery::{BatteryMonitor, BatterySampler};
use firmware::boot;
use firmware::dispatch::Dispatcher;
use firmware::input::{edge_loop, Button, EdgeTriggered, InputBuilder};
use firmware::EmulatorDisplay;
use platform::config::{self, FirmwareProfile};
use platform::mocks::{MockAdc, MockOutputPin};
use platform::{Clock, SoundEffector};

const PROFILE: FirmwareProfile = FirmwareProfile::EDGE_WITH_BATTERY;

/// ADC code the simulated divider reads (about 4.07 V, 89 %).
const SIM_BATTERY_CODE: u16 = 1_000;

/// Wall-clock milliseconds since the simulator started.
#[derive(Clone, Copy)]
struct SimClock(Instant);

impl Clock for SimClock {
    // Truncation is the millisecond counter wrap.
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        self.0.elapsed().as_millis() as u32
    }
}

/// `DelayNs` on top of the tokio timer.
#[derive(Clone, Copy)]
struct TokioDelay;

impl DelayNs for TokioDelay {
    async fn delay_ns(&mut self, ns: u32) {
        tokio::time::sleep(Duration::from_nanos(u64::from(ns))).await;
    }
}

/// Buzzer stand-in: logs the tone and waits for its duration.
struct LoggedBuzzer;

impl SoundEffector for LoggedBuzzer {
    type Error = core::convert::Infallible;

    async fn tone(&mut self, frequency_hz: u32, duration_ms: u32) -> Result<(), Self::Error> {
        tracing::info!(frequency_hz, duration_ms, "buzzer");
        tokio::time::sleep(Duration::from_millis(u64::from(duration_ms))).await;
        Ok(())
    }
}

/// Button pin that produces falling edges at scripted offsets from `start`.
struct ScriptedPin {
    start: tokio::time::Instant,
    edges_ms: VecDeque<u64>,
}

impl ScriptedPin {
    fn new(start: tokio::time::Instant, edges_ms: impl IntoIterator<Item = u64>) -> Self {
        Self {
            start,
            edges_ms: edges_ms.into_iter().collect(),
        }
    }

    async fn next_edge(&mut self) -> Result<(), ErrorKind> {
        let at = self.edges_ms.pop_front().ok_or(ErrorKind::Other)?;
        tokio::time::sleep_until(self.start + Duration::from_millis(at)).await;
        Ok(())
    }
}

impl ErrorType for ScriptedPin {
    type Error = ErrorKind;
}

impl Wait for ScriptedPin {
    async fn wait_for_high(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }

    async fn wait_for_low(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }

    async fn wait_for_rising_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }

    async fn wait_for_falling_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }

    async fn wait_for_any_edge(&mut self) -> Result<(), Self::Error> {
        self.next_edge().await
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} v{} - desktop simulator", config::APP_NAME, config::APP_VERSION);

    let clock = SimClock(Instant::now());
    let mut display = EmulatorDisplay::new();
    let mut sound = LoggedBuzzer;
    boot::start(&mut display, &mut sound, &mut TokioDelay)
        .await
        .map_err(|e| e.to_string())?;

    let builder = InputBuilder::from_profile(&PROFILE);
    let events = builder.events();

    let enable = MockOutputPin::new();
    let adc = MockAdc::constant(SIM_BATTERY_CODE).gated_by(enable.clone());
    let sampler = BatterySampler::new(enable, adc, TokioDelay).map_err(|e| e.to_string())?;
    let battery = BatteryMonitor::new(sampler);

    let mut dispatcher = Dispatcher::new(EdgeTriggered, battery, display, sound, clock, &events);

    // Offsets are from now; each press bounces a few times.
    let start = tokio::time::Instant::now();
    let mut ok = ScriptedPin::new(start, [600, 603, 611]);
    let mut next = ScriptedPin::new(start, [1_400, 1_402, 2_700]);
    let mut prev = ScriptedPin::new(start, [1_550]);
    let mut cancel = ScriptedPin::new(start, [3_300, 3_305, 3_320]);

    let presses = async {
        tokio::join!(
            edge_loop(&mut ok, Button::Ok, &events, &clock),
            edge_loop(&mut next, Button::Next, &events, &clock),
            edge_loop(&mut prev, Button::Prev, &events, &clock),
            edge_loop(&mut cancel, Button::Cancel, &events, &clock),
        );
        // Leave time for the last press and one more battery cycle.
        tokio::time::sleep(Duration::from_millis(1_500)).await;
    };

    tokio::select! {
        _ = dispatcher.run(TokioDelay, PROFILE.idle_ms) => {}
        () = presses => {}
    }

    tracing::info!("simulation finished");
    Ok(())
}
