//! Hardware Abstraction Layer (HAL) for the LoadScale front panel
//!
//! This crate provides the domain types and trait-based abstractions the
//! firmware is written against, so the dispatch logic can be developed and
//! tested without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate: dispatch loop, boot, screens)
//!         ↓
//! Platform HAL (this crate - traits and domain math)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Abstractions
//!
//! - [`ButtonPins`] - raw level sampling of the four front-panel buttons
//! - [`AnalogInput`] - one ADC channel
//! - [`StatusDisplay`] - monochrome off-screen buffer plus present
//! - [`SoundEffector`] - blocking tone generator
//! - [`Clock`] - wrapping millisecond counter
//!
//! Digital outputs and edge waits use the `embedded-hal` 1.0 traits directly.
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module for host test suites
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // pin and register names in doc comments
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

#[cfg(feature = "std")]
extern crate std;

pub mod clock;
pub mod config;
pub mod display;
pub mod gpio;
pub mod input;
pub mod mocks;
pub mod power;
pub mod sound;

pub use clock::{elapsed_ms, Clock};
pub use config::{FirmwareProfile, InputMode};
pub use display::{DisplayInfo, StatusDisplay};
pub use gpio::{AnalogInput, PinState};
pub use input::{Button, ButtonLevels, ButtonPins};
pub use power::{BatteryPercent, BatteryReading, OutOfRangeError};
pub use sound::{Note, SoundEffector};
