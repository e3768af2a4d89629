//! Boot sequence for LoadScale.
//!
//! Order:
//!   1. Initialize the display controller (fatal on failure)
//!   2. Draw and present the splash screen
//!   3. Play the start-up melody (failure is logged and ignored)
//!
//! Input and battery wiring happen afterwards in `main`, once the user has
//! been greeted.

use embedded_hal_async::delay::DelayNs;
use thiserror_no_std::Error;

use platform::{SoundEffector, StatusDisplay};

use crate::log;
use crate::sound::play_startup;
use crate::ui::SplashScreen;

/// Ordered list of boot steps, for documentation and tests.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Display: init controller (fatal on failure)",
    "2. Splash: greeting + product name, presented",
    "3. Melody: A4 C5 E5 A5 with 30 ms gaps",
];

/// Failures that stop the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// The display controller did not come up.
    #[error("display initialization failed")]
    DisplayInit,
}

/// Bring the front panel up and greet the user.
///
/// Only the display init can fail the boot. A splash that fails to draw or
/// present, or a melody that fails to play, is logged and boot continues.
pub async fn start<D, S, W>(display: &mut D, sound: &mut S, delay: &mut W) -> Result<(), BootError>
where
    D: StatusDisplay,
    S: SoundEffector,
    W: DelayNs,
{
    log::info!("boot: display init");
    display.init().await.map_err(|_| BootError::DisplayInit)?;

    log::info!("boot: splash");
    if SplashScreen::render(display).is_err() {
        log::warn!("splash draw failed");
    }
    if display.present().await.is_err() {
        log::warn!("splash present failed");
    }

    log::info!("boot: start-up melody");
    if play_startup(sound, delay).await.is_err() {
        log::warn!("start-up melody failed");
    }
    Ok(())
}

/// Park the CPU forever after a fatal error.
pub fn halt() -> ! {
    log::error!("halted");
    loop {
        #[cfg(feature = "hardware")]
        cortex_m::asm::wfi();
        #[cfg(not(feature = "hardware"))]
        core::hint::spin_loop();
    }
}
