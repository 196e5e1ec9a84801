//! Property-based tests for message synthesis.
// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
//!
//! Verifies invariants hold for ALL bearings and headings, not just fixed examples.

use voice::message::{
    build_message, clock_position, message_words, Phrase, PhraseError, CLOCK_WORDS,
    PHRASE_CAPACITY,
};
use voice::{AlarmLevel, TrafficAlert, Word};

fn alarm_from(raw: u8) -> AlarmLevel {
    AlarmLevel::from_raw(raw).unwrap_or(AlarmLevel::Low)
}

proptest::proptest! {
    /// Every relative bearing except the 345° seam names a clock hour.
    #[test]
    fn position_is_a_clock_hour(bearing in 0i32..360, heading in 0i32..360) {
        let relative = bearing - heading;
        let word = clock_position(relative);
        if relative == 345 {
            assert_eq!(word, Word::Traffic);
        } else {
            assert!(CLOCK_WORDS.contains(&word), "{relative}° gave {word}");
        }
    }

    /// Sectors are 30° wide and centred on the hour.
    #[test]
    fn sector_matches_rounded_hour(relative in -359i32..360) {
        if relative != 345 {
            let hour = usize::try_from((relative + 15).rem_euclid(360) / 30).unwrap_or(0);
            assert_eq!(Some(&clock_position(relative)), CLOCK_WORDS.get(hour));
        }
    }

    /// A bearing and the same bearing one turn back name the same hour.
    #[test]
    fn one_turn_back_names_same_hour(relative in 0i32..360) {
        if relative != 345 {
            assert_eq!(clock_position(relative), clock_position(relative - 360));
        }
    }

    /// Vertical word follows the sign of the altitude difference.
    #[test]
    fn vertical_word_follows_sign(alt in proptest::num::i32::ANY) {
        let a = TrafficAlert { bearing_deg: 0, alt_diff: alt, alarm: AlarmLevel::Low };
        let expected = match alt.signum() {
            1 => Word::High,
            -1 => Word::Low,
            _ => Word::Level,
        };
        assert_eq!(message_words(&a, 0)[2], expected);
    }

    /// Severity word is `danger` exactly for urgent and critical alarms.
    #[test]
    fn severity_word_tracks_alarm(raw in 0u8..=4) {
        let alarm = alarm_from(raw);
        let a = TrafficAlert { bearing_deg: 0, alt_diff: 0, alarm };
        let danger = message_words(&a, 0)[0] == Word::Danger;
        assert_eq!(danger, alarm >= AlarmLevel::Urgent);
    }

    /// A built message is always three vocabulary tokens.
    #[test]
    fn built_message_is_three_known_tokens(
        bearing in -720i32..720,
        heading in 0i32..360,
        alt in -100i32..100,
        raw in 0u8..=4,
    ) {
        let a = TrafficAlert { bearing_deg: bearing, alt_diff: alt, alarm: alarm_from(raw) };
        let phrase = build_message(&a, heading);
        assert_eq!(phrase.tokens().count(), 3);
        assert!(phrase.validate().is_ok());
    }

    /// Parsing succeeds exactly for texts that fit the capacity.
    #[test]
    fn parse_respects_capacity(text in "[a-z ]{0,120}") {
        let parsed = Phrase::parse(&text);
        if text.len() <= PHRASE_CAPACITY {
            assert_eq!(parsed.map(|p| p.len()), Ok(text.len()));
        } else {
            assert_eq!(parsed, Err(PhraseError::Truncated));
        }
    }
}
