//! I2S transmit peripheral abstraction

use crate::audio_config::{I2sConfig, I2sPins};

/// I2S transmit peripheral trait.
///
/// Mirrors the driver lifecycle of a DMA-backed I2S port: install once,
/// optionally route pins, stream bytes, uninstall at teardown.
pub trait I2sTransmitter {
    /// Error type
    type Error: core::fmt::Debug;

    /// Install the driver with the given configuration.
    ///
    /// Installing an already-installed port is a sequencing error; drivers
    /// are free to reject it.
    fn install(&mut self, config: &I2sConfig) -> Result<(), Self::Error>;

    /// Route BCK/WS/SD to GPIOs (external DAC only).
    fn set_pins(&mut self, pins: &I2sPins) -> Result<(), Self::Error>;

    /// Enable or disable the built-in DAC channels.
    fn set_dac_mode(&mut self, mode: DacMode) -> Result<(), Self::Error>;

    /// Queue bytes for DMA transmission.
    ///
    /// Waits at most `timeout_ms` for queue space and returns the number of
    /// bytes accepted, which is less than `data.len()` when the DMA ring
    /// stayed full for the whole timeout.
    fn write(
        &mut self,
        data: &[u8],
        timeout_ms: u32,
    ) -> impl core::future::Future<Output = Result<usize, Self::Error>>;

    /// Stop the port and release the driver.
    fn uninstall(&mut self) -> Result<(), Self::Error>;
}

/// Built-in DAC channel routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DacMode {
    /// Both DAC channels off (pins float, no output)
    Disabled,
    /// Right channel on GPIO25
    RightEnabled,
}
