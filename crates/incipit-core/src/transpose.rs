//! Scale-degree transposition of melody token strings.
//!
//! Phrase search on raw pitch tokens is key-sensitive. When a caller asks
//! for a multi-key phrase search, the query is expanded to the same phrase
//! at several scale-degree offsets and the variants are OR-ed together.
//! Only natural `Letter Octave` pitches are shifted; anything else (rests,
//! accidentals, bare durations) passes through unchanged, mirroring the
//! indexer's predominantly natural token corpus.

const SCALE: [char; 7] = ['C', 'D', 'E', 'F', 'G', 'A', 'B'];

/// Shift a natural pitch like `C4` by `offset` scale degrees, carrying the
/// octave across the C boundary. Returns the input unchanged when it is not
/// a natural `Letter Octave` pitch.
#[must_use]
pub fn transpose_pitch(pitch: &str, offset: i32) -> String {
    let mut chars = pitch.chars();
    let Some(letter) = chars.next() else {
        return pitch.to_string();
    };
    let Some(index) = SCALE.iter().position(|&c| c == letter) else {
        return pitch.to_string();
    };
    let octave_digits = chars.as_str();
    let Ok(octave) = octave_digits.parse::<i32>() else {
        return pitch.to_string();
    };

    let shifted = index as i32 + offset;
    let octave = octave + shifted.div_euclid(SCALE.len() as i32);
    let letter = SCALE[shifted.rem_euclid(SCALE.len() as i32) as usize];
    format!("{letter}{octave}")
}

/// Transpose every `Pitch_duration` token of a melody string by `offset`
/// scale degrees.
#[must_use]
pub fn transpose_melody(melody: &str, offset: i32) -> String {
    melody
        .split_whitespace()
        .map(|token| match token.split_once('_') {
            Some((pitch, duration)) => {
                format!("{}_{}", transpose_pitch(pitch, offset), duration)
            }
            None => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The melody at every scale-degree offset in `0..count`.
#[must_use]
pub fn transposed_queries(melody: &str, count: u32) -> Vec<String> {
    (0..count as i32)
        .map(|offset| transpose_melody(melody, offset))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_pitch_within_octave() {
        assert_eq!(transpose_pitch("C4", 1), "D4");
        assert_eq!(transpose_pitch("C4", 4), "G4");
    }

    #[test]
    fn test_transpose_pitch_across_octave() {
        assert_eq!(transpose_pitch("B4", 1), "C5");
        assert_eq!(transpose_pitch("C4", -1), "B3");
        assert_eq!(transpose_pitch("A4", 9), "C6");
    }

    #[test]
    fn test_non_natural_pitch_passes_through() {
        assert_eq!(transpose_pitch("C#4", 1), "C#4");
        assert_eq!(transpose_pitch("REST", 1), "REST");
    }

    #[test]
    fn test_transpose_melody() {
        assert_eq!(
            transpose_melody("C4_quarter D4_quarter C4_quarter F4_quarter", 1),
            "D4_quarter E4_quarter D4_quarter G4_quarter"
        );
    }

    #[test]
    fn test_transposed_queries_starts_at_identity() {
        let queries = transposed_queries("C4_quarter E4_quarter", 7);
        assert_eq!(queries.len(), 7);
        assert_eq!(queries[0], "C4_quarter E4_quarter");
        assert_eq!(queries[1], "D4_quarter F4_quarter");
    }
}
