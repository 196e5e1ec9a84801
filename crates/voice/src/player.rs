//! Waveform playback.
//!
//! # Frame sequence for one `play` call
//!
//! ```text
//!   internal DAC                        external DAC
//!   ────────────                        ────────────
//!   ramp up    0 → 127  (1024 frames)
//!   waveform   raw u8                   waveform  u8 ^ 0x80
//!     or silence 128 (6144 frames)        or silence 0 (6144 frames)
//!   ramp down  128 → 0  (1024 frames)
//!   wait flush_delay_ms                 wait flush_delay_ms
//! ```
//!
//! The built-in DAC rests at 0 V when idle, so jumping straight to the
//! mid-rail sample value clicks; the ramps walk it there and back.

use embedded_hal_async::delay::DelayNs;
use platform::{
    DacMode, I2sConfig, I2sTransmitter, LoopWatchdog, OutputMode, WatchdogSuspension,
};

use crate::configurator::{configure, ConfigureError};
use crate::writer::{FrameStats, SampleWriter, StereoFrame};

/// Frames in each declick ramp.
pub const RAMP_STEPS: u16 = 1024;

/// Frames of padding played for an empty waveform (~750 ms at 8 kHz).
pub const SILENCE_FRAMES: u32 = 6 * 1024;

/// Streams waveforms to the I2S port.
pub struct Player<T, D, W> {
    writer: SampleWriter<T, D>,
    watchdog: W,
    config: I2sConfig,
    mode: OutputMode,
    installed: bool,
}

impl<T, D, W> Player<T, D, W>
where
    T: I2sTransmitter,
    D: DelayNs,
    W: LoopWatchdog,
{
    /// Create a player; nothing plays until [`Player::install`] succeeds.
    pub fn new(tx: T, delay: D, watchdog: W) -> Self {
        let config = I2sConfig::internal_dac();
        Self {
            writer: SampleWriter::new(tx, delay, config.dma_buffer_period_ms()),
            watchdog,
            config,
            mode: OutputMode::InternalDac,
            installed: false,
        }
    }

    /// Bring up the port for `mode`. No-op if already installed.
    pub fn install(&mut self, mode: OutputMode) -> Result<(), ConfigureError> {
        if self.installed {
            return Ok(());
        }
        let config = configure(self.writer.tx_mut(), mode)?;
        self.writer.set_backoff_ms(config.dma_buffer_period_ms());
        self.config = config;
        self.mode = mode;
        self.installed = true;
        Ok(())
    }

    /// Release the port. No-op if not installed.
    pub fn uninstall(&mut self) {
        if !self.installed {
            return;
        }
        if self.writer.tx_mut().uninstall().is_err() {
            voice_warn!("i2s: uninstall failed");
        }
        self.installed = false;
    }

    /// Play one waveform with ramps, silence padding and drain wait.
    ///
    /// An empty waveform plays [`SILENCE_FRAMES`] of silence. Does nothing
    /// when the port is not installed.
    pub async fn play(&mut self, waveform: &[u8]) {
        if !self.installed {
            return;
        }
        let internal = self.mode.is_internal();

        if internal {
            self.ramp_up().await;
        }

        if waveform.is_empty() {
            let silence = StereoFrame::mono(self.mode.silence_level());
            for _ in 0..SILENCE_FRAMES {
                self.writer.write_frame(silence).await;
            }
        } else {
            let _wdt = WatchdogSuspension::new(&mut self.watchdog);
            for &sample in waveform {
                let level = if internal { sample } else { sample ^ 0x80 };
                self.writer.write_frame(StereoFrame::mono(level)).await;
            }
        }

        if internal {
            self.ramp_down().await;
        }

        self.flush().await;
    }

    async fn ramp_up(&mut self) {
        for i in 0..RAMP_STEPS {
            self.writer.write_frame(ramp_frame(i)).await;
        }
    }

    async fn ramp_down(&mut self) {
        for i in (1..=RAMP_STEPS).rev() {
            self.writer.write_frame(ramp_frame(i)).await;
        }
    }

    /// Switch the built-in DAC channel on (internal mode only).
    pub fn enable_line(&mut self) {
        self.set_line(DacMode::RightEnabled);
    }

    /// Switch the built-in DAC channel off (internal mode only).
    pub fn disable_line(&mut self) {
        self.set_line(DacMode::Disabled);
    }

    fn set_line(&mut self, dac: DacMode) {
        if !self.installed || !self.mode.is_internal() {
            return;
        }
        if self.writer.tx_mut().set_dac_mode(dac).is_err() {
            voice_warn!("i2s: built-in DAC switch failed");
        }
    }

    /// Wait for the DMA ring to drain. No-op when not installed.
    pub async fn flush(&mut self) {
        if self.installed {
            self.writer.delay_ms(self.config.flush_delay_ms()).await;
        }
    }

    /// Block for `ms` milliseconds.
    pub async fn delay_ms(&mut self, ms: u32) {
        self.writer.delay_ms(ms).await;
    }

    /// Whether the port is installed.
    pub fn installed(&self) -> bool {
        self.installed
    }

    /// Output path in use.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Configuration applied at install.
    pub fn config(&self) -> &I2sConfig {
        &self.config
    }

    /// Frame outcome totals.
    pub fn stats(&self) -> FrameStats {
        self.writer.stats()
    }

    /// The transmit port.
    pub fn tx(&self) -> &T {
        self.writer.tx()
    }

    /// The transmit port, mutably.
    pub fn tx_mut(&mut self) -> &mut T {
        self.writer.tx_mut()
    }

    /// The loop watchdog.
    pub fn watchdog(&self) -> &W {
        &self.watchdog
    }
}

fn ramp_frame(step: u16) -> StereoFrame {
    StereoFrame::mono(u8::try_from(step >> 3).unwrap_or(u8::MAX))
}
