//! The tiered search strategy.
//!
//! One mode, one handler, one result shape. A request is validated, its
//! fingerprint computed where the mode calls for one, a tier plan built,
//! and the plan walked in order until a tier produces hits. Tier
//! escalation is strictly sequential: the wildcard tier is only issued
//! after observing the exact tier's empty result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use incipit_core::{fingerprint_melody, fingerprint_rhythm, parse_events, DurationTable};

use crate::catalog::ScoreCatalog;
use crate::config::Config;
use crate::error::SearchError;
use crate::executor::{RankedHit, SearchExecutor};
use crate::tier::{melody_plan, phrase_plan, rhythm_plan, SearchTier};

/// The three search modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Phrase,
    Melody,
    Rhythm,
}

impl FromStr for SearchMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phrase" => Ok(Self::Phrase),
            "melody" => Ok(Self::Melody),
            "rhythm" => Ok(Self::Rhythm),
            other => Err(SearchError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Phrase => f.write_str("phrase"),
            Self::Melody => f.write_str("melody"),
            Self::Rhythm => f.write_str("rhythm"),
        }
    }
}

/// Inbound request, mirroring the wire surface one to one.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "searchType")]
    pub search_type: String,
    #[serde(rename = "multiKey", default)]
    pub multi_key: bool,
    #[serde(default)]
    pub slop: Option<u32>,
}

/// One mapped result, in the engine's relevance order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub title: Option<String>,
    pub composer: Option<String>,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// Outbound response. `mode` names the tier that produced the results
/// (`exact`/`wildcard`), or the last tier attempted when every tier came
/// back empty — an empty result set is a valid, non-error response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub mode: String,
    pub results: Vec<SearchResult>,
    #[serde(rename = "query_fp", skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// The strategy itself: fingerprinters plus an executor plus the plan
/// walker. Stateless between calls; any number of searches may run
/// concurrently on independent instances or behind a shared reference.
#[derive(Debug)]
pub struct SearchService<E> {
    executor: E,
    config: Config,
    durations: DurationTable,
    catalog: Option<ScoreCatalog>,
}

impl<E: SearchExecutor> SearchService<E> {
    #[must_use]
    pub fn new(executor: E, config: Config) -> Self {
        Self {
            executor,
            config,
            durations: DurationTable::standard(),
            catalog: None,
        }
    }

    /// Attach an id→path catalog. With a catalog wired, every hit id must
    /// resolve; without one, results carry no filename.
    #[must_use]
    pub fn with_catalog(mut self, catalog: ScoreCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// The executor behind this service. Mainly useful to tests that need
    /// to inspect a recording mock.
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Run one search request through its tier plan.
    ///
    /// # Errors
    /// Fails with [`SearchError::InvalidMode`] or [`SearchError::EmptyQuery`]
    /// on bad input, a fingerprint error when the query does not parse, a
    /// [`SearchError::LookupMiss`] when a hit has no catalog entry, or
    /// [`SearchError::Execution`] when the backend fails.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let mode: SearchMode = request.search_type.parse()?;
        let query = request.query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let (plan, fingerprint) = self.plan(mode, query, request)?;
        log::info!("{mode} search, {} tier(s)", plan.len());

        // Walk the plan in order; first non-empty tier wins. An empty
        // fingerprint is still a valid (likely empty-result) query.
        let mut hits: Vec<RankedHit> = Vec::new();
        let mut produced = plan
            .last()
            .map_or(crate::tier::TierLabel::Exact, |tier| tier.label);
        for tier in &plan {
            log::debug!("issuing {} tier against {}", tier.label, tier.index);
            hits = self
                .executor
                .execute(&tier.index, &tier.query, self.config.max_hits)
                .await?;
            produced = tier.label;
            if !hits.is_empty() {
                break;
            }
        }

        let results = hits
            .iter()
            .map(|hit| self.map_hit(hit))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SearchResponse {
            mode: produced.to_string(),
            results,
            fingerprint,
        })
    }

    /// Build the tier plan and, for fingerprint modes, the fingerprint that
    /// goes out in the response.
    fn plan(
        &self,
        mode: SearchMode,
        query: &str,
        request: &SearchRequest,
    ) -> Result<(Vec<SearchTier>, Option<String>), SearchError> {
        match mode {
            SearchMode::Phrase => Ok((
                phrase_plan(
                    &self.config.score_index,
                    query,
                    request.slop,
                    request.multi_key,
                ),
                None,
            )),
            SearchMode::Melody => {
                let events = parse_events(query)?;
                let fingerprint = fingerprint_melody(&events)?;
                log::debug!("melody fingerprint: {fingerprint:?}");
                Ok((
                    melody_plan(&self.config.fingerprint_index, &fingerprint, request.slop),
                    Some(fingerprint),
                ))
            }
            SearchMode::Rhythm => {
                let events = parse_events(query)?;
                let fingerprint = fingerprint_rhythm(&events, &self.durations)?;
                log::debug!("rhythm fingerprint: {fingerprint:?}");
                Ok((
                    rhythm_plan(
                        &self.config.fingerprint_index,
                        &fingerprint,
                        request.slop,
                        self.config.rhythm_wildcard_fallback,
                    ),
                    Some(fingerprint),
                ))
            }
        }
    }

    fn map_hit(&self, hit: &RankedHit) -> Result<SearchResult, SearchError> {
        let filename = match &self.catalog {
            Some(catalog) => Some(catalog.filename(&hit.id)?),
            None => None,
        };
        Ok(SearchResult {
            title: hit.doc.title.clone(),
            composer: hit.doc.composer.clone(),
            score: hit.score,
            filename,
        })
    }
}
