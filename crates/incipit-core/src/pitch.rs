//! Pitch-token encoding.
//!
//! A pitch token is a natural letter (`C`..`B`), an optional run of
//! accidental marks (`#` raises a semitone, `-` or `b` lowers one), and a
//! signed octave integer, e.g. `C4`, `F#5`, `B-4`, `E--6`. Encoding maps a
//! token to its MIDI-style semitone number so that melodic intervals can be
//! computed independent of spelling.

use crate::error::{Error, Result};

/// Sentinel token for a rest.
pub const REST: &str = "REST";

/// Sentinel token for a whole-measure rest.
pub const MEASURE_REST: &str = "MEASURE_REST";

/// Returns `true` for the rest sentinels, which carry no pitch.
#[must_use]
pub fn is_rest(token: &str) -> bool {
    token == REST || token == MEASURE_REST
}

/// Semitone offset of each natural letter within an octave (C = 0).
fn base_semitone(letter: char) -> Option<i32> {
    match letter {
        'C' => Some(0),
        'D' => Some(2),
        'E' => Some(4),
        'F' => Some(5),
        'G' => Some(7),
        'A' => Some(9),
        'B' => Some(11),
        _ => None,
    }
}

/// Encode a pitch token as a MIDI-style semitone number.
///
/// The formula is `(octave + 1) * 12 + base(letter) + accidentals`, so
/// `C4` is 60 and `A4` is 69. Accidentals apply cumulatively and
/// order-independently. Consumption of accidental marks is greedy: a `-`
/// between the letter and the digits always reads as a flat, never as the
/// octave sign.
///
/// # Errors
/// Returns [`Error::MalformedPitch`] when the token does not match the
/// `letter [accidental]* octave` grammar. Rest sentinels are not pitches
/// and also fail here; callers filter them out first.
pub fn encode(token: &str) -> Result<i32> {
    let malformed = || Error::MalformedPitch {
        token: token.to_string(),
    };

    let mut chars = token.chars();
    let letter = chars.next().ok_or_else(malformed)?;
    let base = base_semitone(letter).ok_or_else(malformed)?;

    let tail = chars.as_str();
    let accidental_end = tail
        .find(|c| !matches!(c, '#' | '-' | 'b'))
        .unwrap_or(tail.len());
    let (accidentals, octave_digits) = tail.split_at(accidental_end);

    let octave: i32 = octave_digits.parse().map_err(|_| malformed())?;
    let delta: i32 = accidentals
        .chars()
        .map(|c| if c == '#' { 1 } else { -1 })
        .sum();

    Ok((octave + 1) * 12 + base + delta)
}
