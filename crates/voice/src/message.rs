//! Traffic alert → spoken phrase.
//!
//! Every alert becomes three words: severity, clock position, vertical
//! position. `danger two high` reads "danger, two o'clock, above".
//!
//! # Clock sectors
//!
//! ```text
//!                 ahead
//!          eleven   │   one
//!       ten    ╲    │    ╱    two
//!   nine ───────── own ───────── three
//!      eight   ╱    │    ╲   four
//!         seven     │     five
//!                  six
//! ```
//!
//! Sectors are 30° wide and centred on the hour, so `ahead` covers
//! relative bearings 345°..15°.

use core::fmt;

use heapless::String;

use crate::alert::{AlarmLevel, TrafficAlert};

/// Maximum phrase length in bytes.
pub const PHRASE_CAPACITY: usize = 80;

/// Phrase construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror_no_std::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhraseError {
    /// Text does not fit in [`PHRASE_CAPACITY`] bytes
    #[error("phrase exceeds capacity")]
    Truncated,
    /// Token has no recorded fragment
    #[error("token is not in the vocabulary")]
    UnknownWord,
}

/// The closed vocabulary; one pre-recorded fragment per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum Word {
    Ahead,
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Traffic,
    Danger,
    High,
    Low,
    Level,
}

impl Word {
    /// Every word, in vocabulary order.
    pub const ALL: [Word; 17] = [
        Word::Ahead,
        Word::One,
        Word::Two,
        Word::Three,
        Word::Four,
        Word::Five,
        Word::Six,
        Word::Seven,
        Word::Eight,
        Word::Nine,
        Word::Ten,
        Word::Eleven,
        Word::Traffic,
        Word::Danger,
        Word::High,
        Word::Low,
        Word::Level,
    ];

    /// Token text, which is also the fragment's lookup key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Word::Ahead => "ahead",
            Word::One => "one",
            Word::Two => "two",
            Word::Three => "three",
            Word::Four => "four",
            Word::Five => "five",
            Word::Six => "six",
            Word::Seven => "seven",
            Word::Eight => "eight",
            Word::Nine => "nine",
            Word::Ten => "ten",
            Word::Eleven => "eleven",
            Word::Traffic => "traffic",
            Word::Danger => "danger",
            Word::High => "high",
            Word::Low => "low",
            Word::Level => "level",
        }
    }

    /// Parse a token.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|w| w.as_str() == token)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position words indexed by clock sector; sector 0 is dead ahead.
pub const CLOCK_WORDS: [Word; 12] = [
    Word::Ahead,
    Word::One,
    Word::Two,
    Word::Three,
    Word::Four,
    Word::Five,
    Word::Six,
    Word::Seven,
    Word::Eight,
    Word::Nine,
    Word::Ten,
    Word::Eleven,
];

/// Clock position of a relative bearing.
///
/// Bearings are shifted half a sector and wrapped into range once. The upper
/// wrap only fires above 360, so a relative bearing of exactly 345° lands in
/// sector 12, which has no clock word and falls back to [`Word::Traffic`].
#[must_use]
pub fn clock_position(relative_bearing: i32) -> Word {
    let mut shifted = relative_bearing.saturating_add(15);
    if shifted < 0 {
        shifted = shifted.saturating_add(360);
    }
    if shifted > 360 {
        shifted = shifted.saturating_sub(360);
    }
    #[allow(clippy::arithmetic_side_effects)] // non-zero constant divisor
    let sector = shifted / 30;
    usize::try_from(sector)
        .ok()
        .and_then(|i| CLOCK_WORDS.get(i).copied())
        .unwrap_or(Word::Traffic)
}

/// `danger` for urgent and above, `traffic` otherwise.
#[must_use]
pub fn severity_word(alarm: AlarmLevel) -> Word {
    if alarm >= AlarmLevel::Urgent {
        Word::Danger
    } else {
        Word::Traffic
    }
}

/// `high`, `low` or `level` from the sign of the altitude difference.
#[must_use]
pub fn vertical_word(alt_diff: i32) -> Word {
    match alt_diff {
        d if d > 0 => Word::High,
        d if d < 0 => Word::Low,
        _ => Word::Level,
    }
}

/// The three words for `alert`, seen from `own_heading_deg`.
#[must_use]
pub fn message_words(alert: &TrafficAlert, own_heading_deg: i32) -> [Word; 3] {
    let relative = alert.bearing_deg.saturating_sub(own_heading_deg);
    [
        severity_word(alert.alarm),
        clock_position(relative),
        vertical_word(alert.alt_diff),
    ]
}

/// Build the spoken phrase for `alert`.
#[must_use]
pub fn build_message(alert: &TrafficAlert, own_heading_deg: i32) -> Phrase {
    let mut phrase = Phrase::new();
    for word in message_words(alert, own_heading_deg) {
        // Three words are at most 20 bytes.
        let _ = phrase.push_word(word);
    }
    phrase
}

/// Space-separated token text with a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Phrase(String<PHRASE_CAPACITY>);

impl Phrase {
    /// Empty phrase.
    #[must_use]
    pub const fn new() -> Self {
        Self(String::new())
    }

    /// Copy `text` into a phrase. Tokens are not checked against the vocabulary.
    pub fn parse(text: &str) -> Result<Self, PhraseError> {
        let mut s = String::new();
        s.push_str(text).map_err(|_| PhraseError::Truncated)?;
        Ok(Self(s))
    }

    /// Like [`Phrase::parse`], additionally rejecting unknown tokens.
    pub fn parse_strict(text: &str) -> Result<Self, PhraseError> {
        let phrase = Self::parse(text)?;
        phrase.validate()?;
        Ok(phrase)
    }

    /// Append a word, separated by a space. Leaves the phrase unchanged on error.
    pub fn push_word(&mut self, word: Word) -> Result<(), PhraseError> {
        self.push_token(word.as_str())
    }

    /// Append a raw token, separated by a space. Leaves the phrase unchanged on error.
    pub fn push_token(&mut self, token: &str) -> Result<(), PhraseError> {
        let sep = usize::from(!self.0.is_empty());
        if self.0.len().saturating_add(sep).saturating_add(token.len()) > PHRASE_CAPACITY {
            return Err(PhraseError::Truncated);
        }
        if sep == 1 {
            self.0.push(' ').map_err(|_| PhraseError::Truncated)?;
        }
        self.0.push_str(token).map_err(|_| PhraseError::Truncated)
    }

    /// Check every token against the vocabulary.
    pub fn validate(&self) -> Result<(), PhraseError> {
        if self.tokens().all(|t| Word::from_token(t).is_some()) {
            Ok(())
        } else {
            Err(PhraseError::UnknownWord)
        }
    }

    /// Tokens in order; runs of spaces are skipped.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// Words in order, `None` for tokens outside the vocabulary.
    pub fn words(&self) -> impl Iterator<Item = Option<Word>> + '_ {
        self.tokens().map(Word::from_token)
    }

    /// The phrase text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for a phrase with no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn alert(bearing_deg: i32, alt_diff: i32, alarm: AlarmLevel) -> TrafficAlert {
        TrafficAlert {
            bearing_deg,
            alt_diff,
            alarm,
        }
    }

    #[test]
    fn test_urgent_traffic_at_two_oclock_above() {
        let p = build_message(&alert(45, 500, AlarmLevel::Urgent), 0);
        assert_eq!(p.as_str(), "danger two high");
    }

    #[test]
    fn test_one_oclock_sector_ends_below_45() {
        let p = build_message(&alert(30, 500, AlarmLevel::Urgent), 0);
        assert_eq!(p.as_str(), "danger one high");
        assert_eq!(clock_position(44), Word::One);
        assert_eq!(clock_position(45), Word::Two);
    }

    #[test]
    fn test_low_traffic_ahead_across_north() {
        let p = build_message(&alert(0, 0, AlarmLevel::Low), 350);
        assert_eq!(p.as_str(), "traffic ahead level");
    }

    #[test]
    fn test_critical_counts_as_danger() {
        assert_eq!(severity_word(AlarmLevel::Critical), Word::Danger);
        assert_eq!(severity_word(AlarmLevel::Important), Word::Traffic);
    }

    #[test]
    fn test_sector_edges() {
        assert_eq!(clock_position(14), Word::Ahead);
        assert_eq!(clock_position(15), Word::One);
        assert_eq!(clock_position(90), Word::Three);
        assert_eq!(clock_position(180), Word::Six);
        assert_eq!(clock_position(344), Word::Eleven);
        assert_eq!(clock_position(346), Word::Ahead);
        assert_eq!(clock_position(-15), Word::Ahead);
        assert_eq!(clock_position(-16), Word::Eleven);
        assert_eq!(clock_position(-90), Word::Nine);
    }

    #[test]
    fn test_exact_345_falls_back_to_traffic() {
        assert_eq!(clock_position(345), Word::Traffic);
    }

    #[test]
    fn test_far_out_of_range_bearing_is_generic() {
        assert_eq!(clock_position(10_000), Word::Traffic);
        assert_eq!(clock_position(i32::MIN), Word::Traffic);
    }

    #[test]
    fn test_vertical_word_sign() {
        assert_eq!(vertical_word(1), Word::High);
        assert_eq!(vertical_word(-1), Word::Low);
        assert_eq!(vertical_word(0), Word::Level);
    }

    #[test]
    fn test_word_token_round_trip() {
        for w in Word::ALL {
            assert_eq!(Word::from_token(w.as_str()), Some(w));
        }
        assert_eq!(Word::from_token("twelve"), None);
    }

    #[test]
    fn test_phrase_tokens_skip_blank_runs() {
        let p = Phrase::parse("  high  low ").unwrap();
        assert_eq!(p.tokens().collect::<Vec<_>>(), vec!["high", "low"]);
    }

    #[test]
    fn test_phrase_rejects_overlong_text() {
        let long = "traffic ".repeat(11);
        assert!(long.len() > PHRASE_CAPACITY);
        assert_eq!(Phrase::parse(&long), Err(PhraseError::Truncated));
    }

    #[test]
    fn test_push_past_capacity_leaves_phrase_intact() {
        let mut p = Phrase::new();
        while p.push_word(Word::Traffic).is_ok() {}
        let before = p.clone();
        assert_eq!(p.push_word(Word::Low), Err(PhraseError::Truncated));
        assert_eq!(p, before);
        assert!(p.len() <= PHRASE_CAPACITY);
    }

    #[test]
    fn test_strict_parse_rejects_unknown_token() {
        assert!(Phrase::parse_strict("danger ahead level").is_ok());
        assert_eq!(
            Phrase::parse_strict("danger behind"),
            Err(PhraseError::UnknownWord)
        );
        let words: Vec<_> = Phrase::parse("danger behind").unwrap().words().collect();
        assert_eq!(words, vec![Some(Word::Danger), None]);
    }
}
