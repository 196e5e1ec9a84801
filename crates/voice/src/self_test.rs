//! Power-on voice check.
//!
//! After boot the device speaks a short canned phrase that doubles as a
//! crash report: a normal power-up plays two sample alerts, a watchdog
//! reset plays "high low high", and any other restart cause "low low low".

use embedded_hal_async::delay::DelayNs;
use platform::{Clock, I2sTransmitter, LoopWatchdog, NmeaSink, WaveformStore};

use crate::session::VoiceController;

/// Wait before the first phrase, letting the amplifier settle.
pub const SELF_TEST_LEAD_IN_MS: u32 = 800;

/// Gap between the two power-up phrases.
pub const SELF_TEST_GAP_MS: u32 = 3000;

const POWER_UP_PHRASES: &[&str] = &["traffic eleven high", "danger ahead level"];
const WATCHDOG_PHRASES: &[&str] = &["high low high"];
const FAULT_PHRASES: &[&str] = &["low low low"];

/// Why the SoC last restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResetReason {
    /// Power-on
    Default,
    /// Hardware watchdog
    Watchdog,
    /// CPU exception
    Exception,
    /// Software watchdog
    SoftWatchdog,
    /// Deliberate software restart
    SoftRestart,
    /// Wake from deep sleep
    DeepSleepAwake,
    /// External reset pin
    External,
    /// Code not listed above
    Other(u32),
}

impl ResetReason {
    /// Classify a platform reset code.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Self::Default,
            1 => Self::Watchdog,
            2 => Self::Exception,
            3 => Self::SoftWatchdog,
            4 => Self::SoftRestart,
            5 => Self::DeepSleepAwake,
            6 => Self::External,
            other => Self::Other(other),
        }
    }

    /// Short name, for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Default => "power-on",
            Self::Watchdog => "watchdog",
            Self::Exception => "exception",
            Self::SoftWatchdog => "soft watchdog",
            Self::SoftRestart => "soft restart",
            Self::DeepSleepAwake => "deep sleep wake",
            Self::External => "external",
            Self::Other(_) => "other",
        }
    }

    /// Phrases the self test speaks after this kind of restart.
    #[must_use]
    pub const fn phrases(self) -> &'static [&'static str] {
        match self {
            Self::Default | Self::External | Self::SoftRestart => POWER_UP_PHRASES,
            Self::Watchdog => WATCHDOG_PHRASES,
            Self::Exception | Self::SoftWatchdog | Self::DeepSleepAwake | Self::Other(_) => {
                FAULT_PHRASES
            }
        }
    }
}

impl<T, D, W, S, C, N> VoiceController<T, D, W, S, C, N>
where
    T: I2sTransmitter,
    D: DelayNs,
    W: LoopWatchdog,
    S: WaveformStore,
    C: Clock,
    N: NmeaSink,
{
    /// Speak the self-test phrases for `reason`. Does nothing when voice is off.
    pub async fn self_test(&mut self, reason: ResetReason) {
        if !self.settings().mode.is_enabled() {
            return;
        }
        voice_info!("voice: self test, last reset {}", reason.as_str());

        self.pause_ms(SELF_TEST_LEAD_IN_MS).await;
        for (i, phrase) in reason.phrases().iter().enumerate() {
            if i > 0 {
                self.pause_ms(SELF_TEST_GAP_MS).await;
            }
            if self.speak(phrase).await.is_err() {
                voice_warn!("voice: self-test phrase too long");
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::settings::{VoiceMode, VoiceSettings};
    use platform::mocks::{MockClock, MockI2s, MockNmea, MockTones, MockWatchdog, MockWaveforms};

    #[test]
    fn test_reset_codes_classified() {
        assert_eq!(ResetReason::from_raw(0), ResetReason::Default);
        assert_eq!(ResetReason::from_raw(1), ResetReason::Watchdog);
        assert_eq!(ResetReason::from_raw(4), ResetReason::SoftRestart);
        assert_eq!(ResetReason::from_raw(6), ResetReason::External);
        assert_eq!(ResetReason::from_raw(42), ResetReason::Other(42));
    }

    #[test]
    fn test_power_up_category_speaks_two_phrases() {
        for r in [ResetReason::Default, ResetReason::External, ResetReason::SoftRestart] {
            assert_eq!(r.phrases(), &["traffic eleven high", "danger ahead level"]);
        }
        assert_eq!(ResetReason::Watchdog.phrases(), &["high low high"]);
        for r in [
            ResetReason::Exception,
            ResetReason::SoftWatchdog,
            ResetReason::DeepSleepAwake,
            ResetReason::Other(9),
        ] {
            assert_eq!(r.phrases(), &["low low low"]);
        }
    }

    #[tokio::test]
    async fn test_self_test_skipped_when_voice_off() {
        let clock = MockClock::new();
        let player = Player::new(MockI2s::new(), clock.delay(), MockWatchdog::new());
        let mut c = VoiceController::new(
            player,
            MockWaveforms::new(),
            clock.clone(),
            MockNmea::new(),
            VoiceSettings::default(),
        );
        c.setup(&mut MockTones::new());
        c.self_test(ResetReason::Default).await;
        assert_eq!(clock.now_ms(), 0);
        assert!(c.waveforms().lookups().is_empty());
    }

    #[tokio::test]
    async fn test_watchdog_reset_speaks_once_after_lead_in() {
        let clock = MockClock::new();
        let player = Player::new(MockI2s::new(), clock.delay(), MockWatchdog::new());
        let mut c = VoiceController::new(
            player,
            MockWaveforms::new(),
            clock.clone(),
            MockNmea::new(),
            VoiceSettings::with_mode(VoiceMode::External),
        );
        c.setup(&mut MockTones::new());
        c.self_test(ResetReason::Watchdog).await;

        assert_eq!(clock.delays_ms().first(), Some(&SELF_TEST_LEAD_IN_MS));
        assert_eq!(c.waveforms().lookups(), vec!["high", "low", "high"]);
        assert!(c.nmea().sent.is_empty());
    }
}
