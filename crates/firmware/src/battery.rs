//! Battery voltage sampling and the periodic monitor.
//!
//! A measurement cycle:
//!
//! 1. VMETER_CTL high, enabling the divider.
//! 2. Settle for 100 ms.
//! 3. Ten conversions on VMETER_SIG, 10 ms apart, averaged.
//! 4. VMETER_CTL low again, straight after the last conversion.
//!
//! The enable line is held by a `MeasurementPath` guard for the duration of
//! the cycle. Its `Drop` drives the line low, so the divider is switched off
//! even when a conversion fails or the sampling future is dropped mid-cycle.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use thiserror_no_std::Error;

use platform::config::battery::{
    OVERSAMPLE_COUNT, OVERSAMPLE_SPACING_MS, SAMPLE_INTERVAL_MS, SETTLE_MS,
};
use platform::{elapsed_ms, AnalogInput, BatteryReading};

use crate::log;

/// Errors from one measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SampleError {
    /// The enable line could not be driven.
    #[error("measurement enable line error")]
    Gpio,
    /// A conversion failed.
    #[error("ADC conversion error")]
    Adc,
}

/// Switched divider plus ADC channel.
pub struct BatterySampler<EN, ADC, D> {
    enable: EN,
    adc: ADC,
    delay: D,
}

impl<EN, ADC, D> BatterySampler<EN, ADC, D>
where
    EN: OutputPin,
    ADC: AnalogInput,
    D: DelayNs,
{
    /// Take the peripherals and switch the divider off.
    pub fn new(mut enable: EN, adc: ADC, delay: D) -> Result<Self, SampleError> {
        enable.set_low().map_err(|_| SampleError::Gpio)?;
        Ok(Self { enable, adc, delay })
    }

    /// Run one full measurement cycle.
    ///
    /// Takes `&mut self`, so two cycles on the same sampler can never overlap.
    pub async fn sample_now(&mut self) -> Result<BatteryReading, SampleError> {
        let mut path = MeasurementPath::enable(&mut self.enable)?;
        self.delay.delay_ms(SETTLE_MS).await;

        let mut sum: u32 = 0;
        for i in 0..OVERSAMPLE_COUNT {
            if i > 0 {
                self.delay.delay_ms(OVERSAMPLE_SPACING_MS).await;
            }
            let code = self.adc.read().await.map_err(|_| SampleError::Adc)?;
            // 10 × u16::MAX fits comfortably in u32.
            sum = sum.saturating_add(u32::from(code));
        }
        path.disable()?;

        #[allow(clippy::cast_precision_loss, clippy::arithmetic_side_effects)]
        let average = sum as f32 / f32::from(OVERSAMPLE_COUNT);
        Ok(BatteryReading::from_raw_average(average))
    }

    /// Give the peripherals back.
    pub fn release(self) -> (EN, ADC, D) {
        (self.enable, self.adc, self.delay)
    }
}

/// Scoped high level on the measurement enable line.
struct MeasurementPath<'a, EN: OutputPin> {
    pin: &'a mut EN,
    active: bool,
}

impl<'a, EN: OutputPin> MeasurementPath<'a, EN> {
    fn enable(pin: &'a mut EN) -> Result<Self, SampleError> {
        // Construct first so a partial failure still ends with the line low.
        let path = Self { pin, active: true };
        path.pin.set_high().map_err(|_| SampleError::Gpio)?;
        Ok(path)
    }

    fn disable(&mut self) -> Result<(), SampleError> {
        self.active = false;
        self.pin.set_low().map_err(|_| SampleError::Gpio)
    }
}

impl<EN: OutputPin> Drop for MeasurementPath<'_, EN> {
    fn drop(&mut self) {
        if self.active {
            // Nothing useful to do with a failure here.
            let _ = self.pin.set_low();
        }
    }
}

/// Periodic battery source polled by the dispatch loop.
pub trait BatteryService {
    /// Sample if the interval has elapsed; `Some` only when a new reading was
    /// produced on this call.
    fn poll(&mut self, now_ms: u32) -> impl core::future::Future<Output = Option<BatteryReading>>;

    /// Most recent successful reading.
    fn latest(&self) -> Option<BatteryReading>;
}

/// Stand-in for profiles without battery measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBattery;

impl BatteryService for NoBattery {
    async fn poll(&mut self, _now_ms: u32) -> Option<BatteryReading> {
        None
    }

    fn latest(&self) -> Option<BatteryReading> {
        None
    }
}

/// Interval gate plus the retained reading.
///
/// The first cycle runs once 2 s have passed since boot (the last-sample time
/// starts at 0). A failed cycle is logged, the previous reading stays, and the
/// next attempt waits a full interval.
pub struct BatteryMonitor<EN, ADC, D> {
    sampler: BatterySampler<EN, ADC, D>,
    interval_ms: u32,
    last_sample_ms: u32,
    latest: Option<BatteryReading>,
}

impl<EN, ADC, D> BatteryMonitor<EN, ADC, D>
where
    EN: OutputPin,
    ADC: AnalogInput,
    D: DelayNs,
{
    /// Monitor on the default 2 s interval.
    pub fn new(sampler: BatterySampler<EN, ADC, D>) -> Self {
        Self::with_interval(sampler, SAMPLE_INTERVAL_MS)
    }

    /// Monitor on a custom interval.
    pub fn with_interval(sampler: BatterySampler<EN, ADC, D>, interval_ms: u32) -> Self {
        Self {
            sampler,
            interval_ms,
            last_sample_ms: 0,
            latest: None,
        }
    }

    /// Whether a cycle is due at `now_ms`.
    pub fn due(&self, now_ms: u32) -> bool {
        elapsed_ms(now_ms, self.last_sample_ms) >= self.interval_ms
    }

    /// Access the sampler.
    pub fn sampler(&self) -> &BatterySampler<EN, ADC, D> {
        &self.sampler
    }
}

impl<EN, ADC, D> BatteryService for BatteryMonitor<EN, ADC, D>
where
    EN: OutputPin,
    ADC: AnalogInput,
    D: DelayNs,
{
    async fn poll(&mut self, now_ms: u32) -> Option<BatteryReading> {
        if !self.due(now_ms) {
            return None;
        }
        self.last_sample_ms = now_ms;
        match self.sampler.sample_now().await {
            Ok(reading) => {
                log::info!(
                    "battery {} V, {} %",
                    reading.volts,
                    reading.percent.get()
                );
                self.latest = Some(reading);
                Some(reading)
            }
            Err(e) => {
                log::warn!("battery sample failed: {}", e);
                None
            }
        }
    }

    fn latest(&self) -> Option<BatteryReading> {
        self.latest
    }
}
