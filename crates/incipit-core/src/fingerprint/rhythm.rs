//! Tempo-invariant rhythmic fingerprinting.

use crate::duration::DurationTable;
use crate::error::{Error, Result};
use crate::token::NoteEvent;

/// Compute the duration-ratio fingerprint of a note-event sequence.
///
/// Rhythm fingerprinting is pitch-blind: every event contributes its
/// duration, rests included. Each adjacent pair of durations contributes
/// the ratio `current / previous` formatted to two decimals, so scaling
/// every duration by a constant leaves the output unchanged. Fewer than
/// two recognized durations yield an empty string.
///
/// # Errors
/// Returns [`Error::UnknownDuration`] if any label is outside the table;
/// a partial fingerprint is never returned.
pub fn fingerprint_rhythm(events: &[NoteEvent], table: &DurationTable) -> Result<String> {
    let mut fingerprint = Vec::new();
    let mut previous: Option<f64> = None;

    for event in events {
        let current = table
            .lookup(&event.duration)
            .ok_or_else(|| Error::UnknownDuration {
                label: event.duration.clone(),
            })?;
        if let Some(prev) = previous {
            fingerprint.push(format_ratio(current / prev));
        }
        previous = Some(current);
    }

    Ok(fingerprint.join(" "))
}

/// Format a ratio to two decimals, rounding ties away from zero.
///
/// The indexing side formats with the engine's decimal semantics, where an
/// exact `.xx5` rounds up (`0.125` prints as `0.13`). Plain `{:.2}`
/// formatting rounds ties to even, which would print `0.12` and break
/// fingerprint comparability on exactly those ratios.
fn format_ratio(ratio: f64) -> String {
    format!("{:.2}", (ratio * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::parse_events;

    fn fp(text: &str) -> String {
        let table = DurationTable::standard();
        fingerprint_rhythm(&parse_events(text).unwrap(), &table).unwrap()
    }

    #[test]
    fn test_basic_ratios() {
        assert_eq!(fp("C4_quarter D4_eighth E4_eighth"), "0.50 1.00");
        assert_eq!(fp("C4_eighth D4_quarter"), "2.00");
    }

    #[test]
    fn test_pitch_blind() {
        assert_eq!(
            fp("C4_quarter REST_eighth G7_eighth"),
            fp("A2_quarter B-3_eighth MEASURE_REST_eighth")
        );
    }

    #[test]
    fn test_bare_duration_tokens() {
        assert_eq!(fp("quarter eighth eighth"), "0.50 1.00");
    }

    #[test]
    fn test_tempo_invariance() {
        // Doubling every duration preserves the ratios.
        assert_eq!(
            fp("C4_eighth D4_quarter E4_quarter F4_half"),
            fp("C4_quarter D4_half E4_half F4_whole")
        );
    }

    #[test]
    fn test_tie_ratios_round_away_from_zero() {
        // whole -> eighth is exactly 0.125; the index side prints 0.13.
        assert_eq!(fp("C4_whole D4_eighth"), "0.13");
        assert_eq!(fp("C4_half D4_sixteenth E4_half"), "0.13 8.00");
    }

    #[test]
    fn test_triplet_ratios() {
        assert_eq!(fp("C4_tripletEighth D4_tripletQuarter"), "2.00");
        assert_eq!(fp("C4_quarter D4_tripletEighth"), "0.33");
    }

    #[test]
    fn test_short_sequences_are_empty() {
        assert_eq!(fp(""), "");
        assert_eq!(fp("C4_quarter"), "");
    }

    #[test]
    fn test_unknown_duration_aborts() {
        let table = DurationTable::standard();
        let events = parse_events("C4_quarter D4_breve").unwrap();
        assert!(matches!(
            fingerprint_rhythm(&events, &table),
            Err(Error::UnknownDuration { .. })
        ));
    }
}
