//! Note-event parsing.
//!
//! The wire form of a note event is `Pitch_duration` (`C4_quarter`,
//! `B-4_eighth`, `REST_half`, `MEASURE_REST_whole`) or a bare duration
//! label. Anything else is malformed. A whitespace-joined sequence of these
//! tokens is the unit of input to both fingerprinters; ordering is
//! significant and preserved.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pitch;

/// The pitch content of a note event.
///
/// Rests and bare-duration tokens both lack a pitch, but they mean
/// different things to melodic fingerprinting: a rest breaks the interval
/// baseline, a bare duration is simply not a melodic event at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pitch {
    /// A pitch token like `C4` or `B-4`.
    Note(String),
    /// One of the rest sentinels.
    Rest,
    /// A bare-duration token with no pitch segment.
    Unpitched,
}

/// One parsed note event: pitch content plus a duration label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub pitch: Pitch,
    pub duration: String,
}

impl NoteEvent {
    /// Parse a single token.
    ///
    /// The duration label is the segment after the last underscore, which
    /// keeps `MEASURE_REST_whole` intact. A token with no underscore is a
    /// bare duration label.
    ///
    /// # Errors
    /// Returns [`Error::MalformedToken`] when the pitch segment itself
    /// contains an underscore (more than a pitch+duration pair).
    pub fn parse(token: &str) -> Result<Self> {
        match token.rsplit_once('_') {
            Some((head, duration)) => {
                if pitch::is_rest(head) {
                    Ok(Self {
                        pitch: Pitch::Rest,
                        duration: duration.to_string(),
                    })
                } else if head.contains('_') {
                    Err(Error::MalformedToken {
                        token: token.to_string(),
                    })
                } else {
                    Ok(Self {
                        pitch: Pitch::Note(head.to_string()),
                        duration: duration.to_string(),
                    })
                }
            }
            None => Ok(Self {
                pitch: Pitch::Unpitched,
                duration: token.to_string(),
            }),
        }
    }
}

/// Parse a whitespace-separated token sequence into note events.
///
/// # Errors
/// Returns the first [`Error::MalformedToken`] encountered; a malformed
/// token anywhere invalidates the whole sequence.
pub fn parse_events(text: &str) -> Result<Vec<NoteEvent>> {
    text.split_whitespace().map(NoteEvent::parse).collect()
}
