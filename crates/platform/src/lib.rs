//! Hardware Abstraction Layer (HAL) for the traffic voice subsystem
//!
//! This crate provides trait-based abstractions for every collaborator the
//! voice output touches, enabling development and testing without physical
//! hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware main loop)
//!         ↓
//! Feature Layer (voice)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (I2S driver, DAC, flash, UART)
//! ```
//!
//! # Abstractions
//!
//! - [`I2sTransmitter`] - DMA-backed I2S transmit port
//! - [`WaveformStore`] - Pre-recorded voice fragments
//! - [`Clock`] / [`LoopWatchdog`] - Monotonic time and loop liveness
//! - [`NmeaSink`] / [`ToneAlerts`] - Neighbouring subsystems
//!
//! Blocking delays use `embedded_hal_async::delay::DelayNs`.
//!
//! # Features
//!
//! - `std`: Enable standard library support and the [`mocks`] module
//! - `defmt`: Enable defmt::Format derives
//! - `serde`: Enable serde derives on configuration types
//!
//! # Example
//!
//! ```no_run
//! use platform::{I2sConfig, I2sTransmitter};
//!
//! async fn example<T: I2sTransmitter>(port: &mut T) {
//!     port.install(&I2sConfig::internal_dac()).ok();
//!     port.write(&[0, 128, 0, 128], 100).await.ok();
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware HAL crate:
#![allow(clippy::doc_markdown)] // register and pin names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors; callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod asset_store;
pub mod audio_config;
pub mod audio_types;
pub mod config;
pub mod i2s;
pub mod mocks;
pub mod peripheral;
pub mod timing;

// Re-export main high-level traits
pub use asset_store::WaveformStore;
pub use i2s::{DacMode, I2sTransmitter};
pub use peripheral::{NmeaSink, NmeaTargets, ToneAlerts};
pub use timing::{Clock, LoopWatchdog, WatchdogSuspension};

// Re-export configuration types
pub use audio_config::{ChannelFormat, CommFormat, I2sConfig, I2sModeFlags, I2sPins};
pub use audio_types::{GpioNum, OutputMode, SampleRateHz};
