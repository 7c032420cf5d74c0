//! Fingerprint generators.
//!
//! A fingerprint is a normalized string encoding of musical content that is
//! invariant under a specified transformation: transposition for melody,
//! tempo for rhythm. Matching fingerprints by exact or substring string
//! comparison is what makes similarity search possible on a plain inverted
//! index.

pub mod melody;
pub mod rhythm;

pub use melody::fingerprint_melody;
pub use rhythm::fingerprint_rhythm;
