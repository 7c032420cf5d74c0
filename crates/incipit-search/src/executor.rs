//! The seam between the strategy and the external search engine.

use serde::Deserialize;
use thiserror::Error;

use crate::query::QueryAst;

/// The indexed document fields the strategy cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoreDoc {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub composer: Option<String>,
}

/// One ranked hit from the engine, in relevance order.
#[derive(Debug, Clone)]
pub struct RankedHit {
    pub id: String,
    pub score: f64,
    pub doc: ScoreDoc,
}

/// Failures surfaced by an executor, timeouts included.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// The request never produced a usable response.
    #[error("request to search backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("search backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// The backend's response body could not be decoded.
    #[error("malformed response from search backend: {0}")]
    Response(#[from] serde_json::Error),
}

impl ExecuteError {
    /// Returns `true` when the failure is transient and a retry inside the
    /// adapter may succeed. The strategy itself never retries.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Backend { status, .. } => *status == 429 || *status >= 500,
            Self::Response(_) => false,
        }
    }
}

/// Executes one query against one index of the external search engine.
///
/// Implementations own their transport, timeout, and retry behavior; the
/// strategy only sees ranked hits or a structured failure.
#[async_trait::async_trait]
pub trait SearchExecutor: Send + Sync {
    async fn execute(
        &self,
        index: &str,
        query: &QueryAst,
        max_hits: usize,
    ) -> Result<Vec<RankedHit>, ExecuteError>;
}
