//! Runtime voice settings.
//!
//! Persisting these is the settings store's job; the controller only reads
//! them, except for forcing the tone volume off when the external DAC takes
//! over the buzzer pins.

use platform::{NmeaTargets, OutputMode};

use crate::alert::AlarmLevel;

/// Which voice output, if any, is fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiceMode {
    /// Voice disabled
    #[default]
    Off,
    /// Built-in DAC
    Internal,
    /// External I2S DAC
    External,
}

impl VoiceMode {
    /// Output path for this mode, `None` when voice is off.
    #[must_use]
    pub const fn output(self) -> Option<OutputMode> {
        match self {
            Self::Off => None,
            Self::Internal => Some(OutputMode::InternalDac),
            Self::External => Some(OutputMode::External),
        }
    }

    /// Returns `true` unless voice is [`VoiceMode::Off`].
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }
}

/// Tone buzzer volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ToneVolume {
    /// Buzzer silent
    Off,
    /// Reduced volume
    Low,
    /// Full volume
    #[default]
    Full,
}

/// Settings consulted by the voice controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiceSettings {
    /// Voice output selection.
    pub mode: VoiceMode,
    /// Alerts below this severity are not spoken.
    pub min_alarm: AlarmLevel,
    /// Tone buzzer volume.
    pub tone_volume: ToneVolume,
    /// Primary NMEA output enabled.
    pub nmea_primary: bool,
    /// Secondary NMEA output enabled.
    pub nmea_secondary: bool,
}

impl VoiceSettings {
    /// Settings with voice on the given output and everything else default.
    #[must_use]
    pub fn with_mode(mode: VoiceMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// NMEA outputs the `$PSRAA` sentence goes to.
    #[must_use]
    pub const fn nmea_targets(&self) -> NmeaTargets {
        NmeaTargets {
            primary: self.nmea_primary,
            secondary: self.nmea_secondary,
        }
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            mode: VoiceMode::Off,
            min_alarm: AlarmLevel::Low,
            tone_volume: ToneVolume::Full,
            nmea_primary: true,
            nmea_secondary: false,
        }
    }
}
