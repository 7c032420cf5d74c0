//! Core fingerprinting domain for incipit.
//!
//! This crate defines the pitch encoder, the duration table, note-event
//! parsing, and the two fingerprint generators (melodic intervals and
//! rhythmic duration ratios). Everything here is pure and synchronous;
//! the retrieval strategy that consumes these fingerprints lives in
//! `incipit-search`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod duration;
pub mod error;
pub mod fingerprint;
pub mod pitch;
pub mod token;
pub mod transpose;

pub use duration::DurationTable;
pub use error::{Error, Result};
pub use fingerprint::{fingerprint_melody, fingerprint_rhythm};
pub use token::{parse_events, NoteEvent, Pitch};
