//! Tier plans: the escalation ladder as data.
//!
//! Each mode's candidate queries are built up front as an ordered list of
//! immutable tiers. The strategy walks the list and stops at the first tier
//! with hits, so adding a mode or a fallback is a change to a plan builder,
//! not to control flow. No tier is ever retried.

use incipit_core::transpose::transposed_queries;
use std::fmt;

use crate::query::QueryAst;

/// Index field holding the raw `Pitch_duration` token text.
pub const TOKENS_FIELD: &str = "tokens_str";

/// Index field holding the interval fingerprint.
pub const INTERVAL_FIELD: &str = "interval_fp";

/// Index field holding the duration-ratio fingerprint.
pub const RHYTHM_FIELD: &str = "rhythm_fp";

/// Number of scale-degree transpositions for multi-key phrase search.
const MULTI_KEY_OFFSETS: u32 = 7;

/// Expected-outcome label of a tier, reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierLabel {
    Exact,
    Wildcard,
}

impl fmt::Display for TierLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("exact"),
            Self::Wildcard => f.write_str("wildcard"),
        }
    }
}

/// One candidate query: label, target index, query body.
#[derive(Debug, Clone)]
pub struct SearchTier {
    pub label: TierLabel,
    pub index: String,
    pub query: QueryAst,
}

impl SearchTier {
    fn exact(index: &str, query: QueryAst) -> Self {
        Self {
            label: TierLabel::Exact,
            index: index.to_string(),
            query,
        }
    }

    fn wildcard(index: &str, query: QueryAst) -> Self {
        Self {
            label: TierLabel::Wildcard,
            index: index.to_string(),
            query,
        }
    }
}

/// Phrase mode: a single exact tier, terminal regardless of hit count.
/// With `multi_key`, the phrase is OR-ed over seven scale-degree
/// transpositions so a melody typed in one key still matches the others.
#[must_use]
pub fn phrase_plan(index: &str, query: &str, slop: Option<u32>, multi_key: bool) -> Vec<SearchTier> {
    let query = if multi_key {
        QueryAst::any_of(
            transposed_queries(query, MULTI_KEY_OFFSETS)
                .into_iter()
                .map(|variant| QueryAst::match_phrase(TOKENS_FIELD, variant).with_slop(slop))
                .collect(),
        )
    } else {
        QueryAst::match_phrase(TOKENS_FIELD, query).with_slop(slop)
    };
    vec![SearchTier::exact(index, query)]
}

/// Melody mode: exact phrase on the interval fingerprint, then a wildcard
/// containment of the same fingerprint if the exact tier comes back empty.
#[must_use]
pub fn melody_plan(index: &str, fingerprint: &str, slop: Option<u32>) -> Vec<SearchTier> {
    vec![
        SearchTier::exact(
            index,
            QueryAst::match_phrase(INTERVAL_FIELD, fingerprint).with_slop(slop),
        ),
        SearchTier::wildcard(index, QueryAst::wildcard_contains(INTERVAL_FIELD, fingerprint)),
    ]
}

/// Rhythm mode: a single exact tier by contract; the wildcard fallback is
/// appended only when configuration asks for the same escalation melody has.
#[must_use]
pub fn rhythm_plan(
    index: &str,
    fingerprint: &str,
    slop: Option<u32>,
    wildcard_fallback: bool,
) -> Vec<SearchTier> {
    let mut plan = vec![SearchTier::exact(
        index,
        QueryAst::match_phrase(RHYTHM_FIELD, fingerprint).with_slop(slop),
    )];
    if wildcard_fallback {
        plan.push(SearchTier::wildcard(
            index,
            QueryAst::wildcard_contains(RHYTHM_FIELD, fingerprint),
        ));
    }
    plan
}
