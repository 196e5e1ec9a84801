//! Neighbouring peripheral abstractions
//!
//! The voice output shares hardware with two other subsystems: the tone
//! buzzer (GPIO14/15, taken over by the external I2S DAC) and the NMEA
//! outputs used to notify companion devices.

/// NMEA output selection.
///
/// The device has two independently configured NMEA outputs; each sentence
/// is sent to every enabled one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NmeaTargets {
    /// Primary NMEA output enabled
    pub primary: bool,
    /// Secondary NMEA output enabled
    pub secondary: bool,
}

impl NmeaTargets {
    /// Returns `true` if at least one output is enabled.
    pub const fn any(self) -> bool {
        self.primary || self.secondary
    }
}

/// Sink for NMEA sentences.
///
/// Transport (UART, UDP, Bluetooth) is the implementation's concern.
pub trait NmeaSink {
    /// Send a complete sentence (including checksum and CR LF) to `targets`.
    fn send(&mut self, targets: NmeaTargets, sentence: &str);
}

/// The audible-tone alert subsystem.
pub trait ToneAlerts {
    /// Stop the tone generator and release its pins.
    fn shutdown(&mut self);
}
