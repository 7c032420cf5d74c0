//! Transposition-invariant melodic fingerprinting.

use crate::error::Result;
use crate::pitch;
use crate::token::{NoteEvent, Pitch};

/// Compute the interval fingerprint of a note-event sequence.
///
/// Each adjacent pair of pitched events contributes one token
/// `"<+/-N>_<duration>"`, where N is the signed semitone interval and the
/// duration label is taken from the second event of the pair. Adding a
/// constant to every pitch leaves the output unchanged.
///
/// A rest resets the interval baseline: no token spans the gap, and the
/// first pitch after it starts fresh. A bare-duration event is not a
/// melodic event at all; it is skipped and the baseline survives it.
/// Fewer than two baseline-connected pitches yield an empty string.
///
/// # Errors
/// Returns [`Error::MalformedPitch`] if any pitched event fails encoding;
/// a partial fingerprint is never returned.
///
/// [`Error::MalformedPitch`]: crate::error::Error::MalformedPitch
pub fn fingerprint_melody(events: &[NoteEvent]) -> Result<String> {
    let mut fingerprint = Vec::new();
    let mut previous: Option<i32> = None;

    for event in events {
        let token = match &event.pitch {
            Pitch::Note(token) => token,
            Pitch::Rest => {
                previous = None;
                continue;
            }
            Pitch::Unpitched => continue,
        };
        let current = pitch::encode(token)?;
        if let Some(prev) = previous {
            fingerprint.push(format!("{:+}_{}", current - prev, event.duration));
        }
        previous = Some(current);
    }

    Ok(fingerprint.join(" "))
}
