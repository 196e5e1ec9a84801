//! Audio domain newtypes for compile-time safety.
//!
//! These zero-cost abstractions keep the output configuration readable:
//! - `OutputMode`: the two mutually exclusive voice output paths
//! - `SampleRateHz`: the clock rate handed to the I2S driver
//! - `GpioNum`: a board pin number

// ── OutputMode ───────────────────────────────────────────────────────────────

/// Physical path the voice samples take out of the SoC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Built-in 8-bit DAC, right channel routed to GPIO25.
    ///
    /// Samples are unsigned and sit in the MSB of each 16-bit slot.
    InternalDac,
    /// Off-chip DAC over a three-wire I2S bus (BCK, WS, SD).
    ///
    /// Samples are signed 16-bit.
    External,
}

impl OutputMode {
    /// Frame value that produces no audible output on this path.
    ///
    /// The built-in DAC idles at mid-rail, an I2S DAC at digital zero.
    #[must_use]
    pub const fn silence_level(self) -> u8 {
        match self {
            Self::InternalDac => 128,
            Self::External => 0,
        }
    }

    /// Returns `true` for [`OutputMode::InternalDac`].
    #[must_use]
    pub const fn is_internal(self) -> bool {
        matches!(self, Self::InternalDac)
    }
}

// ── SampleRateHz ─────────────────────────────────────────────────────────────

/// Sample rate in Hz.
///
/// Voice fragments are recorded at 8 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SampleRateHz(u32);

impl SampleRateHz {
    /// The rate every voice fragment is encoded at.
    pub const VOICE: Self = Self(8_000);

    /// Return the sample rate in Hz.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

// ── GpioNum ──────────────────────────────────────────────────────────────────

/// A GPIO number on the ESP32 (0–39).
///
/// Pins 34–39 are input only, so output routes use lower pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct GpioNum(u8);

impl GpioNum {
    /// Wrap a board-fixed pin number.
    #[must_use]
    pub const fn new(num: u8) -> Self {
        Self(num)
    }

    /// Return the raw GPIO number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}
