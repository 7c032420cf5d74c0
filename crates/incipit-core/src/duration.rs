//! The fixed duration-label table.
//!
//! Duration labels are the categorical symbols the indexer emits
//! (`quarter`, `dottedEighth`, ...), each mapped to a quarter-note-relative
//! length. The table is built once and passed by reference to whatever
//! needs it; it is never mutated.

use std::collections::HashMap;

/// Immutable mapping from duration label to quarter-note-relative length.
#[derive(Debug, Clone)]
pub struct DurationTable {
    lengths: HashMap<&'static str, f64>,
}

impl DurationTable {
    /// The standard table used by both the indexer and the query side.
    ///
    /// Both sides must agree on these values verbatim for rhythm
    /// fingerprints to be comparable.
    #[must_use]
    pub fn standard() -> Self {
        let lengths = HashMap::from([
            ("tripletEighth", 1.0 / 3.0),
            ("tripletQuarter", 2.0 / 3.0),
            ("sixteenth", 0.25),
            ("eighth", 0.5),
            ("dottedEighth", 0.75),
            ("quarter", 1.0),
            ("dottedQuarter", 1.5),
            ("half", 2.0),
            ("dottedHalf", 3.0),
            ("whole", 4.0),
            ("dottedWhole", 6.0),
            ("doubleWhole", 8.0),
            ("dottedDoubleWhole", 12.0),
        ]);
        Self { lengths }
    }

    /// Look up the quarter-note-relative length of a label, if known.
    #[must_use]
    pub fn lookup(&self, label: &str) -> Option<f64> {
        self.lengths.get(label).copied()
    }

    /// Returns `true` when the label is in the table.
    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.lengths.contains_key(label)
    }
}

impl Default for DurationTable {
    fn default() -> Self {
        Self::standard()
    }
}
