//! Audio peripheral configuration for the voice output.
//!
//! Defines the I2S port configuration for both output paths and the pin
//! routing used by the external DAC.
//!
//! # Clock Chain
//!
//! Voice fragments are 8-bit, 8 kHz. Each sample is sent as one 16-bit
//! stereo frame, so the bit clock is tiny:
//!
//! ```text
//! APLL → I2S0 master clock
//!   → BCK = 16 × 2 × 8 000 = 256 kHz
//!   → WS  = 8 kHz
//! ```
//!
//! # DMA
//!
//! 16 descriptors of 1024 frames each. One descriptor drains in 128 ms, the
//! whole ring in a little over two seconds.

use crate::audio_types::{GpioNum, OutputMode, SampleRateHz};

/// Number of DMA descriptors in the transmit ring.
pub const DMA_BUF_COUNT: u16 = 16;

/// Frames per DMA descriptor.
pub const DMA_BUF_LEN: u16 = 1024;

/// Operating mode bits of the I2S port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sModeFlags {
    /// Port generates BCK/WS.
    pub master: bool,
    /// Port transmits.
    pub transmit: bool,
    /// Port feeds the built-in DAC instead of the serial pins.
    pub dac_built_in: bool,
}

/// Slot layout within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelFormat {
    /// Separate right and left slots
    RightLeft,
}

/// Serial data alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommFormat {
    /// Philips I2S: data delayed one BCK after WS edge
    StandardI2s,
    /// MSB-justified (required by the built-in DAC)
    StandardMsb,
}

/// I2S port configuration for voice output.
///
/// Target: 16-bit, 8 kHz, 2 channels, 16 × 1024-frame DMA ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sConfig {
    /// Master/transmit/DAC mode bits.
    pub mode: I2sModeFlags,
    /// Sample rate (fixed at 8 kHz for voice).
    pub sample_rate: SampleRateHz,
    /// Bits per sample slot.
    pub bits_per_sample: u8,
    /// Slot layout.
    pub channel_format: ChannelFormat,
    /// Data alignment.
    pub comm_format: CommFormat,
    /// Number of DMA descriptors.
    pub dma_buf_count: u16,
    /// Frames per DMA descriptor.
    pub dma_buf_len: u16,
    /// Clock the port from the audio PLL.
    pub use_apll: bool,
    /// Zero the descriptor after it has been sent, so an underrun plays silence.
    pub tx_desc_auto_clear: bool,
}

impl I2sConfig {
    /// Built-in DAC path: master TX feeding the on-chip DAC, MSB-justified.
    pub const fn internal_dac() -> Self {
        Self {
            mode: I2sModeFlags {
                master: true,
                transmit: true,
                dac_built_in: true,
            },
            sample_rate: SampleRateHz::VOICE,
            bits_per_sample: 16,
            channel_format: ChannelFormat::RightLeft,
            comm_format: CommFormat::StandardMsb,
            dma_buf_count: DMA_BUF_COUNT,
            dma_buf_len: DMA_BUF_LEN,
            use_apll: true,
            tx_desc_auto_clear: true,
        }
    }

    /// External DAC path: master TX on the serial pins, Philips format.
    pub const fn external() -> Self {
        Self {
            mode: I2sModeFlags {
                master: true,
                transmit: true,
                dac_built_in: false,
            },
            comm_format: CommFormat::StandardI2s,
            ..Self::internal_dac()
        }
    }

    /// Configuration for the given output path.
    pub const fn for_mode(mode: OutputMode) -> Self {
        match mode {
            OutputMode::InternalDac => Self::internal_dac(),
            OutputMode::External => Self::external(),
        }
    }

    /// Calculate the bit clock (BCK) frequency in Hz.
    ///
    /// BCK = `bits_per_sample` × 2 × `sample_rate`.
    /// For 16-bit / 8 kHz: 256 000 Hz.
    pub fn bclk_hz(&self) -> u32 {
        u32::from(self.bits_per_sample)
            .saturating_mul(2)
            .saturating_mul(self.sample_rate.get())
    }

    /// Total frames the DMA ring can hold.
    pub fn dma_capacity_frames(&self) -> u32 {
        u32::from(self.dma_buf_count).saturating_mul(u32::from(self.dma_buf_len))
    }

    /// Time one DMA descriptor takes to drain, in milliseconds.
    ///
    /// This is the back-off a writer waits before retrying a partial write.
    pub fn dma_buffer_period_ms(&self) -> u32 {
        u32::from(self.dma_buf_len)
            .saturating_mul(1000)
            .checked_div(self.sample_rate.get())
            .unwrap_or(0)
    }

    /// Wait after the last write before the output line may be switched off.
    ///
    /// Ring capacity / 32, which at 8 kHz is about a quarter of the
    /// full-ring drain time; the descriptors are auto-cleared so anything
    /// left after this only plays as silence.
    pub fn flush_delay_ms(&self) -> u32 {
        self.dma_capacity_frames() / 32
    }
}

/// Pin routing for the external I2S DAC.
///
/// # Pin Assignments
///
/// | Function | GPIO | Note                          |
/// |----------|------|-------------------------------|
/// | BCK      | 14   | shared with the tone buzzer   |
/// | WS       | 15   | shared with the tone buzzer   |
/// | SD       | 25   | same pin as the built-in DAC  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct I2sPins {
    /// Serial clock.
    pub bck: GpioNum,
    /// Word select.
    pub ws: GpioNum,
    /// Serial data out.
    pub data_out: GpioNum,
}

impl I2sPins {
    /// Board wiring used for the external DAC.
    pub const EXTERNAL_DAC: Self = Self {
        bck: GpioNum::new(14),
        ws: GpioNum::new(15),
        data_out: GpioNum::new(25),
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn internal_dac_feeds_builtin_dac() {
        let cfg = I2sConfig::internal_dac();
        assert!(cfg.mode.master && cfg.mode.transmit && cfg.mode.dac_built_in);
        assert_eq!(cfg.comm_format, CommFormat::StandardMsb);
    }

    #[test]
    fn external_uses_philips_format() {
        let cfg = I2sConfig::external();
        assert!(!cfg.mode.dac_built_in);
        assert_eq!(cfg.comm_format, CommFormat::StandardI2s);
        assert_eq!(cfg.channel_format, ChannelFormat::RightLeft);
    }

    #[test]
    fn both_paths_share_clock_and_dma_geometry() {
        let int = I2sConfig::internal_dac();
        let ext = I2sConfig::external();
        assert_eq!(int.sample_rate, ext.sample_rate);
        assert_eq!(int.dma_capacity_frames(), ext.dma_capacity_frames());
    }

    #[test]
    fn sample_rate_is_8khz() {
        assert_eq!(I2sConfig::internal_dac().sample_rate.get(), 8_000);
    }

    #[test]
    fn bclk_is_256_khz() {
        // 16 bits × 2 channels × 8 000
        assert_eq!(I2sConfig::internal_dac().bclk_hz(), 256_000);
    }

    #[test]
    fn dma_ring_holds_16k_frames() {
        assert_eq!(I2sConfig::internal_dac().dma_capacity_frames(), 16 * 1024);
    }

    #[test]
    fn one_descriptor_drains_in_128_ms() {
        assert_eq!(I2sConfig::internal_dac().dma_buffer_period_ms(), 128);
    }

    #[test]
    fn flush_delay_is_512_ms() {
        assert_eq!(I2sConfig::external().flush_delay_ms(), 512);
    }

    #[test]
    fn external_pins_match_board() {
        let pins = I2sPins::EXTERNAL_DAC;
        assert_eq!(pins.bck.get(), 14);
        assert_eq!(pins.ws.get(), 15);
        assert_eq!(pins.data_out.get(), 25);
    }

    #[test]
    fn for_mode_selects_preset() {
        assert_eq!(
            I2sConfig::for_mode(OutputMode::External),
            I2sConfig::external()
        );
        assert_eq!(
            I2sConfig::for_mode(OutputMode::InternalDac),
            I2sConfig::internal_dac()
        );
    }
}
