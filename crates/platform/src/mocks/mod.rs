//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests. Every mock records the calls it
//! receives so tests can assert on them after handing the mock to the code
//! under test.

#![cfg(any(test, feature = "std"))]
#![allow(clippy::arithmetic_side_effects)] // mock counters; overflow not a concern in tests
#![allow(clippy::indexing_slicing)] // lengths checked by chunks_exact / min

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use embassy_time::Instant;
use embedded_hal_async::delay::DelayNs;

use crate::*;

// ── I2S ───────────────────────────────────────────────────────────────────────

/// Errors produced by [`MockI2s`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockI2sError {
    /// `fail_install` was set
    InstallFailed,
    /// `install` called on an installed port
    AlreadyInstalled,
    /// `fail_pins` was set
    PinsFailed,
    /// Operation requires an installed port
    NotInstalled,
}

/// Mock I2S port
pub struct MockI2s {
    /// Configuration of the current installation, if any.
    pub installed: Option<I2sConfig>,
    /// Pins bound by the last `set_pins`.
    pub pins: Option<I2sPins>,
    /// Current built-in DAC routing.
    pub dac_mode: DacMode,
    /// Every `set_dac_mode` call, in order.
    pub dac_history: Vec<DacMode>,
    /// All bytes accepted by `write`, in order.
    pub bytes: Vec<u8>,
    /// Number of `write` calls.
    pub write_calls: usize,
    /// Number of successful installs.
    pub install_count: usize,
    /// Number of successful uninstalls.
    pub uninstall_count: usize,
    /// Make the next `install` fail.
    pub fail_install: bool,
    /// Make `set_pins` fail.
    pub fail_pins: bool,
    /// Accepted byte counts for the next `write` calls; full acceptance once empty.
    pub accept: VecDeque<usize>,
}

impl MockI2s {
    /// Create an uninstalled mock port
    pub fn new() -> Self {
        Self {
            installed: None,
            pins: None,
            dac_mode: DacMode::Disabled,
            dac_history: Vec::new(),
            bytes: Vec::new(),
            write_calls: 0,
            install_count: 0,
            uninstall_count: 0,
            fail_install: false,
            fail_pins: false,
            accept: VecDeque::new(),
        }
    }

    /// Script the byte counts the next writes will accept.
    pub fn accept_next(&mut self, counts: &[usize]) {
        self.accept.extend(counts.iter().copied());
    }

    /// Accepted bytes grouped into 4-byte stereo frames.
    pub fn frames(&self) -> Vec<[u8; 4]> {
        self.bytes
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect()
    }

    /// MSB of the right channel of every accepted frame.
    pub fn levels(&self) -> Vec<u8> {
        self.frames().iter().map(|f| f[1]).collect()
    }
}

impl Default for MockI2s {
    fn default() -> Self {
        Self::new()
    }
}

impl I2sTransmitter for MockI2s {
    type Error = MockI2sError;

    fn install(&mut self, config: &I2sConfig) -> Result<(), Self::Error> {
        if self.fail_install {
            return Err(MockI2sError::InstallFailed);
        }
        if self.installed.is_some() {
            return Err(MockI2sError::AlreadyInstalled);
        }
        self.installed = Some(*config);
        self.install_count += 1;
        Ok(())
    }

    fn set_pins(&mut self, pins: &I2sPins) -> Result<(), Self::Error> {
        if self.fail_pins {
            return Err(MockI2sError::PinsFailed);
        }
        if self.installed.is_none() {
            return Err(MockI2sError::NotInstalled);
        }
        self.pins = Some(*pins);
        Ok(())
    }

    fn set_dac_mode(&mut self, mode: DacMode) -> Result<(), Self::Error> {
        self.dac_mode = mode;
        self.dac_history.push(mode);
        Ok(())
    }

    async fn write(&mut self, data: &[u8], _timeout_ms: u32) -> Result<usize, Self::Error> {
        if self.installed.is_none() {
            return Err(MockI2sError::NotInstalled);
        }
        self.write_calls += 1;
        let n = self
            .accept
            .pop_front()
            .unwrap_or(data.len())
            .min(data.len());
        self.bytes.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn uninstall(&mut self) -> Result<(), Self::Error> {
        if self.installed.take().is_none() {
            return Err(MockI2sError::NotInstalled);
        }
        self.pins = None;
        self.uninstall_count += 1;
        Ok(())
    }
}

// ── Clock + delay ─────────────────────────────────────────────────────────────

struct MockTime {
    now_us: Cell<u64>,
    delays_ms: RefCell<Vec<u32>>,
}

/// Mock monotonic clock
///
/// Cheap to clone; clones share one timeline. Time only moves when a test
/// calls [`MockClock::advance_ms`] or a [`MockDelay`] from [`MockClock::delay`]
/// is awaited.
#[derive(Clone)]
pub struct MockClock {
    time: Rc<MockTime>,
}

impl MockClock {
    /// Create a clock at t = 0
    pub fn new() -> Self {
        Self::starting_at_ms(0)
    }

    /// Create a clock at the given time
    pub fn starting_at_ms(ms: u64) -> Self {
        Self {
            time: Rc::new(MockTime {
                now_us: Cell::new(ms * 1000),
                delays_ms: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Move time forward
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }

    fn advance_us(&self, us: u64) {
        self.time.now_us.set(self.time.now_us.get() + us);
    }

    /// Current time in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.time.now_us.get() / 1000
    }

    /// A delay that advances this clock instead of sleeping
    pub fn delay(&self) -> MockDelay {
        MockDelay {
            clock: self.clone(),
        }
    }

    /// Every millisecond delay awaited so far, in order
    pub fn delays_ms(&self) -> Vec<u32> {
        self.time.delays_ms.borrow().clone()
    }

    /// Sum of all millisecond delays awaited so far
    pub fn total_delay_ms(&self) -> u64 {
        self.time.delays_ms.borrow().iter().map(|&d| u64::from(d)).sum()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.time.now_us.get())
    }
}

/// Mock delay bound to a [`MockClock`]
pub struct MockDelay {
    clock: MockClock,
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.clock.advance_us(u64::from(ns) / 1000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.clock.time.delays_ms.borrow_mut().push(ms);
        self.clock.advance_ms(u64::from(ms));
    }
}

// ── Watchdog ──────────────────────────────────────────────────────────────────

/// Mock loop watchdog
pub struct MockWatchdog {
    /// Whether the watchdog is armed.
    pub enabled: bool,
    /// Number of `enable` calls.
    pub enable_count: usize,
    /// Number of `disable` calls.
    pub disable_count: usize,
}

impl MockWatchdog {
    /// Create an armed watchdog
    pub fn new() -> Self {
        Self {
            enabled: true,
            enable_count: 0,
            disable_count: 0,
        }
    }

    /// Create a watchdog that starts disarmed
    pub fn disarmed() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }
}

impl Default for MockWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopWatchdog for MockWatchdog {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn enable(&mut self) {
        self.enabled = true;
        self.enable_count += 1;
    }

    fn disable(&mut self) {
        self.enabled = false;
        self.disable_count += 1;
    }
}

// ── Waveforms ─────────────────────────────────────────────────────────────────

/// Mock fragment store
pub struct MockWaveforms {
    words: BTreeMap<String, Vec<u8>>,
    lookups: RefCell<Vec<String>>,
}

impl MockWaveforms {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            words: BTreeMap::new(),
            lookups: RefCell::new(Vec::new()),
        }
    }

    /// Add a fragment
    pub fn with_word(mut self, token: &str, data: &[u8]) -> Self {
        self.words.insert(token.to_string(), data.to_vec());
        self
    }

    /// Add `len` bytes of `level` for every token in `tokens`
    pub fn with_words(mut self, tokens: &[&str], level: u8, len: usize) -> Self {
        for token in tokens {
            self.words.insert((*token).to_string(), vec![level; len]);
        }
        self
    }

    /// Every token looked up so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.borrow().clone()
    }
}

impl Default for MockWaveforms {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveformStore for MockWaveforms {
    fn lookup(&self, token: &str) -> Option<&[u8]> {
        self.lookups.borrow_mut().push(token.to_string());
        self.words.get(token).map(Vec::as_slice)
    }
}

// ── NMEA + tones ──────────────────────────────────────────────────────────────

/// Mock NMEA sink
#[derive(Default)]
pub struct MockNmea {
    /// Every sentence sent, with its targets.
    pub sent: Vec<(NmeaTargets, String)>,
}

impl MockNmea {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl NmeaSink for MockNmea {
    fn send(&mut self, targets: NmeaTargets, sentence: &str) {
        self.sent.push((targets, sentence.to_string()));
    }
}

/// Mock tone subsystem
#[derive(Default)]
pub struct MockTones {
    /// Number of `shutdown` calls.
    pub shutdown_count: usize,
}

impl MockTones {
    /// Create a running tone subsystem
    pub fn new() -> Self {
        Self::default()
    }
}

impl ToneAlerts for MockTones {
    fn shutdown(&mut self) {
        self.shutdown_count += 1;
    }
}
