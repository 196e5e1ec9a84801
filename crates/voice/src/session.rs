//! Voice session controller.
//!
//! `VoiceController` owns the player and every collaborator, and speaks at
//! most one phrase at a time:
//!
//! ```text
//!            notify() accepted                 playback done
//!   Idle ─────────────────────────▶ Streaming ──────────────▶ Cooldown
//!    ▲                                                           │
//!    └──────────── tick(): > VOICE_COOLDOWN_MS since start ──────┘
//! ```
//!
//! Cooldown is measured from the start of the session, so a phrase that took
//! longer than the cooldown to play is released on the next `tick()`.

use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;
use platform::config::{APP_NAME, APP_VERSION};
use platform::{Clock, I2sTransmitter, LoopWatchdog, NmeaSink, ToneAlerts, WaveformStore};

use crate::alert::TrafficAlert;
use crate::message::{build_message, Phrase, PhraseError};
use crate::nmea::status_sentence;
use crate::player::Player;
use crate::settings::{ToneVolume, VoiceMode, VoiceSettings};

/// Minimum time between the starts of two spoken notifications, in milliseconds.
pub const VOICE_COOLDOWN_MS: u64 = 3000;

/// Where the controller is in its speak/cooldown cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// Ready to accept a notification.
    Idle,
    /// A phrase is being played.
    Streaming {
        /// Session start.
        started_at: Instant,
    },
    /// Phrase finished; waiting out the cooldown.
    Cooldown {
        /// Session start.
        started_at: Instant,
    },
}

impl SessionState {
    /// Returns `true` in [`SessionState::Idle`].
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Turns traffic alerts into speech.
pub struct VoiceController<T, D, W, S, C, N> {
    player: Player<T, D, W>,
    waveforms: S,
    clock: C,
    nmea: N,
    settings: VoiceSettings,
    state: SessionState,
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
    /// Create an idle controller. Call [`VoiceController::setup`] before use.
    pub fn new(
        player: Player<T, D, W>,
        waveforms: S,
        clock: C,
        nmea: N,
        settings: VoiceSettings,
    ) -> Self {
        Self {
            player,
            waveforms,
            clock,
            nmea,
            settings,
            state: SessionState::Idle,
        }
    }

    /// Bring up the output selected in the settings.
    ///
    /// The external DAC shares GPIO14/15 with the buzzer, so the tone
    /// subsystem is shut down and its volume forced off first. Does nothing
    /// when voice is off or the port is already installed for the selected
    /// output; a port installed for the other output is released and
    /// reinstalled. A failed install is logged and leaves the controller
    /// silent until the next `setup`.
    pub fn setup<A: ToneAlerts>(&mut self, tones: &mut A) {
        let Some(output) = self.settings.mode.output() else {
            voice_debug!("voice: disabled");
            return;
        };
        if self.player.installed() {
            if self.player.mode() == output {
                return;
            }
            voice_info!("voice: switching output, internal dac = {}", output.is_internal());
            self.player.uninstall();
        }
        if self.settings.mode == VoiceMode::External {
            tones.shutdown();
            self.settings.tone_volume = ToneVolume::Off;
        }
        match self.player.install(output) {
            Ok(()) => voice_info!("{} {}: ready", APP_NAME, APP_VERSION),
            Err(_) => voice_warn!("voice: output unavailable, alerts will not be spoken"),
        }
    }

    /// Speak `alert` if voice is on, no session is active and the alarm is
    /// severe enough.
    ///
    /// Returns `true` if the alert was spoken. An accepted alert is also
    /// reported as `$PSRAA` on the enabled NMEA outputs while the buzzer is
    /// muted.
    pub async fn notify(&mut self, alert: &TrafficAlert, own_heading_deg: i32) -> bool {
        if !self.settings.mode.is_enabled()
            || !self.state.is_idle()
            || alert.alarm < self.settings.min_alarm
        {
            voice_trace!("voice: alert ignored, level {}", alert.alarm.raw());
            return false;
        }

        let phrase = build_message(alert, own_heading_deg);
        voice_info!("voice: {}", phrase.as_str());
        self.say(&phrase).await;

        let targets = self.settings.nmea_targets();
        if targets.any() && self.settings.tone_volume == ToneVolume::Off {
            match status_sentence(alert.alarm) {
                Ok(sentence) => self.nmea.send(targets, &sentence),
                Err(_) => voice_warn!("voice: status sentence overflow"),
            }
        }
        true
    }

    /// Speak arbitrary text through the session path.
    ///
    /// Unknown tokens play as silence. Ignores the cooldown; callers that
    /// care check [`VoiceController::state`] first.
    pub async fn speak(&mut self, text: &str) -> Result<(), PhraseError> {
        let phrase = Phrase::parse(text)?;
        self.say(&phrase).await;
        Ok(())
    }

    async fn say(&mut self, phrase: &Phrase) {
        let started_at = self.clock.now();
        self.state = SessionState::Streaming { started_at };

        self.player.enable_line();
        for token in phrase.tokens() {
            let waveform: &[u8] = match self.waveforms.lookup(token) {
                Some(w) => w,
                None => {
                    voice_debug!("voice: no fragment for '{}'", token);
                    &[]
                }
            };
            self.player.play(waveform).await;
        }
        self.player.play(&[]).await;
        self.player.flush().await;
        self.player.disable_line();

        self.state = SessionState::Cooldown { started_at };
    }

    /// Release the cooldown once it has run out. Call periodically.
    pub fn tick(&mut self) {
        if let SessionState::Cooldown { started_at } = self.state {
            let elapsed = self.clock.now().saturating_duration_since(started_at);
            if elapsed > Duration::from_millis(VOICE_COOLDOWN_MS) {
                voice_debug!("voice: cooldown over after {} ms", elapsed.as_millis());
                self.state = SessionState::Idle;
            }
        }
    }

    /// Release the port and return to idle.
    pub fn shutdown(&mut self) {
        self.player.uninstall();
        self.state = SessionState::Idle;
        voice_info!("voice: shut down");
    }

    /// Block for `ms` milliseconds.
    pub(crate) async fn pause_ms(&mut self, ms: u32) {
        self.player.delay_ms(ms).await;
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Active settings.
    pub fn settings(&self) -> &VoiceSettings {
        &self.settings
    }

    /// Settings for modification; `None` while a session is active.
    pub fn settings_mut(&mut self) -> Option<&mut VoiceSettings> {
        if self.state.is_idle() {
            Some(&mut self.settings)
        } else {
            None
        }
    }

    /// The player.
    pub fn player(&self) -> &Player<T, D, W> {
        &self.player
    }

    /// The player, mutably.
    pub fn player_mut(&mut self) -> &mut Player<T, D, W> {
        &mut self.player
    }

    /// The fragment store.
    pub fn waveforms(&self) -> &S {
        &self.waveforms
    }

    /// The NMEA sink.
    pub fn nmea(&self) -> &N {
        &self.nmea
    }
}
