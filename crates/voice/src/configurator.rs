//! One-time I2S port setup for either output path.

use platform::{DacMode, I2sConfig, I2sPins, I2sTransmitter, OutputMode};

/// Why the port could not be brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigureError {
    /// Driver installation rejected the configuration
    #[error("I2S driver install failed")]
    Install,
    /// The external DAC pins could not be routed
    #[error("I2S pin binding failed")]
    PinBinding,
}

/// Install the I2S driver for `mode` and route its output.
///
/// External DAC: binds BCK/WS/SD to GPIO14/15/25. Both paths leave the
/// built-in DAC channel disabled; internal mode enables it per phrase. A
/// port whose pins could not be bound is uninstalled again, so a later
/// attempt starts clean.
///
/// Returns the configuration that was applied.
pub fn configure<T: I2sTransmitter>(
    tx: &mut T,
    mode: OutputMode,
) -> Result<I2sConfig, ConfigureError> {
    let config = I2sConfig::for_mode(mode);

    if tx.install(&config).is_err() {
        voice_warn!("i2s: driver install failed");
        return Err(ConfigureError::Install);
    }

    if mode == OutputMode::External && tx.set_pins(&I2sPins::EXTERNAL_DAC).is_err() {
        voice_warn!("i2s: pin binding failed");
        if tx.uninstall().is_err() {
            voice_warn!("i2s: uninstall after pin failure failed");
        }
        return Err(ConfigureError::PinBinding);
    }
    if tx.set_dac_mode(DacMode::Disabled).is_err() {
        voice_warn!("i2s: could not park built-in DAC");
    }

    voice_info!(
        "i2s: {} Hz, {} x {} frame ring, internal dac = {}",
        config.sample_rate.get(),
        config.dma_buf_count,
        config.dma_buf_len,
        mode.is_internal()
    );
    Ok(config)
}
