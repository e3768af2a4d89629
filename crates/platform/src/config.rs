//! Application configuration and constants
//!
//! Central naming, pin assignments, timing and calibration values, plus the
//! firmware profiles that select how the dispatch loop is composed. All other
//! code should reference these constants rather than hardcoding values.

/// The application name
pub const APP_NAME: &str = "LoadScale";

/// Splash-screen greeting line
pub const SPLASH_GREETING: &str = "Hello world";

/// Application version (synchronized with Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// STM32F103C8 pin assignments.
///
/// | Signal       | Pin  | Notes                                   |
/// |--------------|------|-----------------------------------------|
/// | OLED SDA     | PB11 | I2C2                                    |
/// | OLED SCL     | PB10 | I2C2                                    |
/// | Buzzer       | PA4  | Push-pull output, bit-banged            |
/// | VMETER_CTL   | PA6  | Must be HIGH before VMETER_SIG is valid |
/// | VMETER_SIG   | PA5  | ADC1 channel 5                          |
/// | BTN OK       | PA3  | Active-low, internal pull-up, EXTI3     |
/// | BTN NEXT     | PA2  | Active-low, internal pull-up, EXTI2     |
/// | BTN PREV     | PA1  | Active-low, internal pull-up, EXTI1     |
/// | BTN CANCEL   | PA0  | Active-low, internal pull-up, EXTI0     |
/// | HX711 SCK    | PB4  | Reserved, unused                        |
/// | HX711 DOUT   | PB3  | Reserved, unused                        |
pub mod pins {
    /// 7-bit I2C address of the SSD1306 OLED.
    pub const OLED_I2C_ADDRESS: u8 = 0x3C;
    /// OLED I2C bus clock.
    pub const OLED_I2C_HZ: u32 = 400_000;
}

/// Loop and debounce timing.
pub mod timing {
    /// Debounce window of the polling profile.
    pub const POLL_DEBOUNCE_MS: u32 = 50;
    /// Debounce window of the edge-triggered profile.
    pub const EDGE_DEBOUNCE_MS: u32 = 200;
    /// Debounce window of the edge-triggered + battery profile.
    pub const EDGE_BATTERY_DEBOUNCE_MS: u32 = 300;
    /// Idle delay at the end of a polling loop iteration.
    pub const POLL_IDLE_MS: u32 = 2;
    /// Idle delay at the end of an edge-triggered loop iteration.
    pub const EDGE_IDLE_MS: u32 = 10;
}

/// Battery measurement schedule.
pub mod battery {
    /// Minimum time between two measurement cycles.
    pub const SAMPLE_INTERVAL_MS: u32 = 2_000;
    /// Divider settle time after VMETER_CTL goes high.
    pub const SETTLE_MS: u32 = 100;
    /// Conversions averaged per cycle.
    pub const OVERSAMPLE_COUNT: u16 = 10;
    /// Gap between consecutive conversions.
    pub const OVERSAMPLE_SPACING_MS: u32 = 10;
}

/// How button transitions reach the debounce logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    /// The main loop samples raw levels every iteration.
    Polling,
    /// Falling-edge signals invoke the debounce logic asynchronously.
    EdgeTriggered,
}

/// One composition of the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareProfile {
    /// Input strategy.
    pub input_mode: InputMode,
    /// Global debounce window.
    pub debounce_ms: u32,
    /// Whether the battery monitor runs.
    pub battery: bool,
    /// Idle delay at the end of every loop iteration.
    pub idle_ms: u32,
}

impl FirmwareProfile {
    /// Poll-only buttons, no battery measurement.
    pub const POLLING: Self = Self {
        input_mode: InputMode::Polling,
        debounce_ms: timing::POLL_DEBOUNCE_MS,
        battery: false,
        idle_ms: timing::POLL_IDLE_MS,
    };

    /// Interrupt-driven buttons, no battery measurement.
    pub const EDGE_TRIGGERED: Self = Self {
        input_mode: InputMode::EdgeTriggered,
        debounce_ms: timing::EDGE_DEBOUNCE_MS,
        battery: false,
        idle_ms: timing::EDGE_IDLE_MS,
    };

    /// Interrupt-driven buttons plus the periodic battery screen.
    pub const EDGE_WITH_BATTERY: Self = Self {
        input_mode: InputMode::EdgeTriggered,
        debounce_ms: timing::EDGE_BATTERY_DEBOUNCE_MS,
        battery: true,
        idle_ms: timing::EDGE_IDLE_MS,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_delay_stays_short() {
        for profile in [
            FirmwareProfile::POLLING,
            FirmwareProfile::EDGE_TRIGGERED,
            FirmwareProfile::EDGE_WITH_BATTERY,
        ] {
            assert!((2..=10).contains(&profile.idle_ms));
        }
    }

    #[test]
    fn only_the_battery_profile_samples() {
        assert!(!FirmwareProfile::POLLING.battery);
        assert!(!FirmwareProfile::EDGE_TRIGGERED.battery);
        assert!(FirmwareProfile::EDGE_WITH_BATTERY.battery);
    }

    #[test]
    fn battery_cycle_fits_inside_its_interval() {
        let busy = battery::SETTLE_MS
            + u32::from(battery::OVERSAMPLE_COUNT - 1) * battery::OVERSAMPLE_SPACING_MS;
        assert!(busy < battery::SAMPLE_INTERVAL_MS);
    }
}
