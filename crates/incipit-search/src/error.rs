//! Request-level error taxonomy for the search strategy.

use thiserror::Error;

use crate::executor::ExecuteError;

/// Errors a search request can surface to the caller.
///
/// None of these are retried by the strategy; retry policy, where it exists
/// at all, belongs to the executor adapter.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The requested search mode is not one of phrase/melody/rhythm.
    #[error("invalid search mode: {0}")]
    InvalidMode(String),

    /// The query was blank.
    #[error("empty query")]
    EmptyQuery,

    /// Fingerprinting the query failed; the whole request is aborted.
    #[error("fingerprint error: {0}")]
    Fingerprint(#[from] incipit_core::Error),

    /// A hit's id has no entry in the id→path catalog. A data-integrity gap
    /// between the index and the catalog, surfaced rather than dropped.
    #[error("no file mapping for score id {id}")]
    LookupMiss { id: String },

    /// The external search engine failed, timeouts included.
    #[error("search execution failed: {0}")]
    Execution(#[from] ExecuteError),
}

pub type Result<T> = std::result::Result<T, SearchError>;
