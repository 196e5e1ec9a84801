//! Spoken traffic alerts
//!
//! Turns collision alarms into short phrases ("danger one high") assembled
//! from pre-recorded word fragments and streamed to an I2S port, either into
//! the SoC's built-in DAC or an external I2S DAC.
//!
//! # Pipeline
//!
//! ```text
//! TrafficAlert ──▶ message::build_message ──▶ Phrase ("danger one high")
//!                                                │ per token
//!                                                ▼
//!                         WaveformStore::lookup ──▶ Player::play
//!                                                      │ per sample
//!                                                      ▼
//!                                  SampleWriter ──▶ I2sTransmitter (DMA)
//! ```
//!
//! [`session::VoiceController`] ties it together and rate-limits: one phrase
//! at a time, then a cooldown.
//!
//! # Features
//!
//! - `std`: log through `tracing`
//! - `defmt`: log through `defmt` and derive `defmt::Format`
//! - `serde`: serde derives on [`settings::VoiceSettings`]

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[macro_use]
mod log;

pub mod alert;
pub mod configurator;
pub mod message;
pub mod nmea;
pub mod player;
pub mod self_test;
pub mod session;
pub mod settings;
pub mod writer;

pub use alert::{AlarmLevel, TrafficAlert};
pub use configurator::ConfigureError;
pub use message::{build_message, Phrase, PhraseError, Word};
pub use player::Player;
pub use self_test::ResetReason;
pub use session::{SessionState, VoiceController, VOICE_COOLDOWN_MS};
pub use settings::{ToneVolume, VoiceMode, VoiceSettings};
pub use writer::{FrameStats, StereoFrame, WriteOutcome};
