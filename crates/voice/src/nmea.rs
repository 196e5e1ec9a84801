//! `$PSRAA` companion sentence.
//!
//! When the buzzer is muted, companion devices learn about a spoken alarm
//! through a proprietary sentence carrying the alarm level minus one:
//!
//! ```text
//! $PSRAA,2*4F\r\n
//! ```

use core::fmt::Write;

use heapless::String;

use crate::alert::AlarmLevel;

/// Capacity of a formatted status sentence.
pub const SENTENCE_CAPACITY: usize = 24;

/// A formatted NMEA sentence including checksum and CR LF.
pub type Sentence = String<SENTENCE_CAPACITY>;

/// Sentence formatting errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SentenceError {
    /// Sentence does not fit in [`SENTENCE_CAPACITY`] bytes
    #[error("sentence exceeds capacity")]
    Overflow,
}

/// XOR of every byte in `body`.
#[must_use]
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Append `*XX\r\n` to a sentence that starts with `$`.
///
/// The checksum covers everything between the `$` and the `*`.
pub fn finish_sentence(body: &str) -> Result<Sentence, SentenceError> {
    let payload = body.strip_prefix('$').unwrap_or(body);
    let mut out = Sentence::new();
    write!(out, "{}*{:02X}\r\n", body, checksum(payload))
        .map_err(|_| SentenceError::Overflow)?;
    Ok(out)
}

/// Alarm status sentence for `alarm`.
pub fn status_sentence(alarm: AlarmLevel) -> Result<Sentence, SentenceError> {
    let mut body: String<SENTENCE_CAPACITY> = String::new();
    write!(body, "$PSRAA,{}", alarm.raw().saturating_sub(1))
        .map_err(|_| SentenceError::Overflow)?;
    finish_sentence(&body)
}
