//! LoadScale Firmware
//!
//! Front-panel firmware for an STM32F103C8 board: four buttons, a battery
//! voltage monitor, an SSD1306 OLED and a piezo buzzer.
//!
//! # Architecture
//!
//! ```text
//! Edge tasks / polling sweep ──► ButtonEvents (atomics)
//!                                      │
//! BatteryMonitor ──────────────► Dispatcher ──► StatusDisplay + SoundEffector
//! ```
//!
//! Detection only raises flags; every display and buzzer effect happens in
//! the [`dispatch::Dispatcher`] loop.
//!
//! # Features
//!
//! - `hardware` - Build for the STM32F103C8 target (embassy, defmt)
//! - `emulator` - Build the desktop simulator (tokio, tracing, simulator window)
//! - `std` - Enable standard library (for emulator and testing)
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo xtask flash --release
//! ```
//!
//! ## Emulator Target
//!
//! ```bash
//! cargo run --example desktop_sim --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
// Upgrade relevant warns to deny; keep pedantic as warn (too noisy for firmware)
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)]
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline (allow println in tests via clippy.toml)
#![warn(clippy::print_stdout)]
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(async_fn_in_trait)] // single-core executor, no Send bounds needed
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::unused_async)]

pub(crate) mod log;

pub mod battery;
pub mod boot;
pub mod dispatch;
pub mod display;
#[cfg(feature = "hardware")]
pub mod hal;
pub mod input;
pub mod sound;
pub mod ui;

// Re-export key types
pub use battery::{BatteryMonitor, BatterySampler, BatteryService, NoBattery, SampleError};
pub use boot::BootError;
pub use dispatch::{Dispatcher, Iteration};
pub use display::{DisplayError, Ssd1306, DISPLAY_HEIGHT, DISPLAY_WIDTH, FRAMEBUFFER_SIZE};
pub use input::{ButtonEvents, EdgeTriggered, InputBuilder, InputStrategy, PollingInput};
pub use sound::{Buzzer, BuzzerError};

#[cfg(feature = "emulator")]
pub use display::EmulatorDisplay;
