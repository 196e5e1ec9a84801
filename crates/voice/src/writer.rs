//! Overflow-tolerant frame writer.
//!
//! Each voice sample goes out as one 4-byte stereo frame. When the DMA ring
//! is full the write times out with only part of the frame queued; the writer
//! then waits one descriptor period for space and retries the remainder
//! exactly once. Whatever is still left after that is dropped: a short glitch
//! is preferable to stalling the main loop.

use embedded_hal_async::delay::DelayNs;
use platform::I2sTransmitter;

/// Bytes per stereo 16-bit frame.
pub const FRAME_BYTES: usize = 4;

/// Per-write queue timeout, in milliseconds.
pub const WRITE_TIMEOUT_MS: u32 = 100;

/// One stereo frame carrying the same 8-bit level on both channels.
///
/// Little-endian 16-bit slots with the level in the MSB: `[0, v, 0, v]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StereoFrame([u8; FRAME_BYTES]);

impl StereoFrame {
    /// Frame with `level` on both channels.
    #[must_use]
    pub const fn mono(level: u8) -> Self {
        Self([0, level, 0, level])
    }

    /// Wire bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.0
    }

    /// The 8-bit level carried by the frame.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.0[1]
    }
}

/// Result of submitting one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteOutcome {
    /// Whole frame accepted on the first attempt
    Complete,
    /// First attempt partial, retry accepted the rest
    Retried,
    /// Retry also fell short; `bytes` were discarded
    Dropped {
        /// Bytes that never reached the queue
        bytes: usize,
    },
}

/// Running totals of [`WriteOutcome`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameStats {
    /// Frames fully queued, with or without a retry.
    pub written: u32,
    /// Frames that needed the retry.
    pub retried: u32,
    /// Frames that lost bytes.
    pub dropped: u32,
}

impl FrameStats {
    /// Fold one outcome into the totals.
    pub fn record(&mut self, outcome: WriteOutcome) {
        match outcome {
            WriteOutcome::Complete => {
                self.written = self.written.saturating_add(1);
            }
            WriteOutcome::Retried => {
                self.written = self.written.saturating_add(1);
                self.retried = self.retried.saturating_add(1);
            }
            WriteOutcome::Dropped { .. } => {
                self.dropped = self.dropped.saturating_add(1);
            }
        }
    }

    /// Total frames submitted.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.written.saturating_add(self.dropped)
    }
}

/// Submit one frame, retrying a partial write once after `backoff_ms`.
///
/// A driver error counts as zero bytes accepted.
pub async fn write_frame<T: I2sTransmitter, D: DelayNs>(
    tx: &mut T,
    delay: &mut D,
    frame: StereoFrame,
    backoff_ms: u32,
) -> WriteOutcome {
    let bytes = frame.as_bytes();
    let first = queue(tx, bytes).await;
    if first >= FRAME_BYTES {
        return WriteOutcome::Complete;
    }

    delay.delay_ms(backoff_ms).await;

    let rest = bytes.get(first..).unwrap_or(&[]);
    let second = queue(tx, rest).await;
    if second >= rest.len() {
        WriteOutcome::Retried
    } else {
        WriteOutcome::Dropped {
            bytes: rest.len().saturating_sub(second),
        }
    }
}

async fn queue<T: I2sTransmitter>(tx: &mut T, data: &[u8]) -> usize {
    tx.write(data, WRITE_TIMEOUT_MS)
        .await
        .map_or(0, |n| n.min(data.len()))
}

/// Frame writer owning the transmit port and delay.
pub struct SampleWriter<T, D> {
    tx: T,
    delay: D,
    backoff_ms: u32,
    stats: FrameStats,
}

impl<T: I2sTransmitter, D: DelayNs> SampleWriter<T, D> {
    /// Create a writer that backs off `backoff_ms` on a partial write.
    pub fn new(tx: T, delay: D, backoff_ms: u32) -> Self {
        Self {
            tx,
            delay,
            backoff_ms,
            stats: FrameStats::default(),
        }
    }

    /// Submit one frame and record the outcome.
    pub async fn write_frame(&mut self, frame: StereoFrame) -> WriteOutcome {
        let outcome = write_frame(&mut self.tx, &mut self.delay, frame, self.backoff_ms).await;
        if let WriteOutcome::Dropped { bytes } = outcome {
            voice_warn!("i2s: queue full, dropped {} bytes", bytes);
        }
        self.stats.record(outcome);
        outcome
    }

    /// Block for `ms` milliseconds.
    pub async fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms).await;
    }

    /// Change the retry back-off.
    pub fn set_backoff_ms(&mut self, backoff_ms: u32) {
        self.backoff_ms = backoff_ms;
    }

    /// Outcome totals since construction.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The transmit port.
    pub fn tx(&self) -> &T {
        &self.tx
    }

    /// The transmit port, mutably.
    pub fn tx_mut(&mut self) -> &mut T {
        &mut self.tx
    }
}
