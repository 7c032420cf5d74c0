//! Elasticsearch-compatible executor over HTTP.

use backon::{ExponentialBuilder, Retryable};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use crate::executor::{ExecuteError, RankedHit, ScoreDoc, SearchExecutor};
use crate::query::QueryAst;

/// Executes queries against an Elasticsearch-compatible `_search` endpoint.
#[derive(Debug, Clone)]
pub struct ElasticExecutor {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct EsResponse {
    hits: EsHits,
}

#[derive(Debug, Deserialize)]
struct EsHits {
    hits: Vec<EsHit>,
}

#[derive(Debug, Deserialize)]
struct EsHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score")]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: ScoreDoc,
}

impl ElasticExecutor {
    /// Create a new executor for the given node URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("incipit/0.1.0")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn search_once(
        &self,
        index: &str,
        body: &serde_json::Value,
    ) -> Result<Vec<RankedHit>, ExecuteError> {
        let url = format!("{}/{}/_search", self.base_url, index);
        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ExecuteError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        let parsed: EsResponse = serde_json::from_str(&text)?;
        Ok(parsed
            .hits
            .hits
            .into_iter()
            .map(|hit| RankedHit {
                id: hit.id,
                score: hit.score.unwrap_or(0.0),
                doc: hit.source,
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl SearchExecutor for ElasticExecutor {
    async fn execute(
        &self,
        index: &str,
        query: &QueryAst,
        max_hits: usize,
    ) -> Result<Vec<RankedHit>, ExecuteError> {
        let body = json!({
            "size": max_hits,
            "query": query.to_body(),
        });

        // Bounded backoff on transient failures only; the strategy above
        // this seam never retries.
        let hits = (|| async { self.search_once(index, &body).await })
            .retry(ExponentialBuilder::default().with_max_times(2))
            .when(ExecuteError::is_transient)
            .notify(|err: &ExecuteError, dur: Duration| {
                log::warn!("retrying search backend after {dur:?}: {err}");
            })
            .await?;

        log::debug!("index {index}: {} hit(s)", hits.len());
        Ok(hits)
    }
}
