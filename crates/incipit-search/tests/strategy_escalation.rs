//! Integration tests for the tiered strategy.
//!
//! A recording mock stands in for the search engine so the tests can assert
//! on exactly which queries were issued, in which order, against which
//! index — no backend required.

use std::collections::HashMap;
use std::sync::Mutex;

use incipit_search::{
    Config, ExecuteError, QueryAst, RankedHit, ScoreCatalog, ScoreDoc, SearchError,
    SearchExecutor, SearchRequest, SearchService,
};

/// Mock executor: queues one canned hit list per call, records every call.
#[derive(Debug, Default)]
struct RecordingExecutor {
    responses: Mutex<Vec<Vec<RankedHit>>>,
    calls: Mutex<Vec<(String, QueryAst)>>,
}

impl RecordingExecutor {
    fn with_responses(responses: Vec<Vec<RankedHit>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(String, QueryAst)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchExecutor for RecordingExecutor {
    async fn execute(
        &self,
        index: &str,
        query: &QueryAst,
        _max_hits: usize,
    ) -> Result<Vec<RankedHit>, ExecuteError> {
        self.calls
            .lock()
            .unwrap()
            .push((index.to_string(), query.clone()));
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Vec::new())
        } else {
            Ok(responses.remove(0))
        }
    }
}

fn hit(id: &str, title: &str, score: f64) -> RankedHit {
    RankedHit {
        id: id.to_string(),
        score,
        doc: ScoreDoc {
            title: Some(title.to_string()),
            composer: Some("Anonymous".to_string()),
        },
    }
}

fn request(query: &str, search_type: &str) -> SearchRequest {
    SearchRequest {
        query: query.to_string(),
        search_type: search_type.to_string(),
        multi_key: false,
        slop: None,
    }
}

fn service(executor: RecordingExecutor) -> SearchService<RecordingExecutor> {
    SearchService::new(executor, Config::default())
}

#[tokio::test]
async fn melody_exact_hit_short_circuits_wildcard() {
    let executor = RecordingExecutor::with_responses(vec![vec![hit("s1", "Prelude", 2.0)]]);
    let service = service(executor);

    let response = service
        .search(&request("C4_quarter E4_quarter G4_quarter", "melody"))
        .await
        .unwrap();

    assert_eq!(response.mode, "exact");
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].title.as_deref(), Some("Prelude"));
    assert_eq!(
        response.fingerprint.as_deref(),
        Some("+4_quarter +3_quarter")
    );

    // The wildcard tier was never issued.
    let calls = service_calls(&service);
    assert_eq!(calls.len(), 1);
    assert!(matches!(calls[0].1, QueryAst::MatchPhrase { .. }));
}

#[tokio::test]
async fn melody_escalates_to_wildcard_on_empty_exact() {
    let executor =
        RecordingExecutor::with_responses(vec![Vec::new(), vec![hit("s2", "Fugue", 1.1)]]);
    let service = service(executor);

    let response = service
        .search(&request("C4_quarter D4_quarter", "melody"))
        .await
        .unwrap();

    assert_eq!(response.mode, "wildcard");
    assert_eq!(response.results.len(), 1);

    let calls = service_calls(&service);
    assert_eq!(calls.len(), 2);
    assert!(matches!(calls[0].1, QueryAst::MatchPhrase { .. }));
    assert!(matches!(calls[1].1, QueryAst::WildcardContains { .. }));
    // Both tiers target the fingerprint index.
    assert_eq!(calls[0].0, "musicxml_intervals");
    assert_eq!(calls[1].0, "musicxml_intervals");
}

#[tokio::test]
async fn melody_terminal_after_both_tiers_empty() {
    let service = service(RecordingExecutor::default());

    let response = service
        .search(&request("C4_quarter D4_quarter", "melody"))
        .await
        .unwrap();

    // Empty result set is a valid, non-error response.
    assert_eq!(response.mode, "wildcard");
    assert!(response.results.is_empty());
    assert_eq!(service_calls(&service).len(), 2);
}

#[tokio::test]
async fn phrase_is_single_tier_even_when_empty() {
    let service = service(RecordingExecutor::default());

    let response = service
        .search(&request("C4_quarter D4_quarter", "phrase"))
        .await
        .unwrap();

    assert_eq!(response.mode, "exact");
    assert!(response.results.is_empty());
    assert!(response.fingerprint.is_none());

    let calls = service_calls(&service);
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "musicxml");
}

#[tokio::test]
async fn rhythm_defaults_to_single_tier() {
    let service = service(RecordingExecutor::default());

    let response = service
        .search(&request("C4_quarter D4_eighth E4_eighth", "rhythm"))
        .await
        .unwrap();

    assert_eq!(response.mode, "exact");
    assert_eq!(response.fingerprint.as_deref(), Some("0.50 1.00"));
    assert_eq!(service_calls(&service).len(), 1);
}

#[tokio::test]
async fn rhythm_escalates_when_configured() {
    let executor = RecordingExecutor::default();
    let config = Config {
        rhythm_wildcard_fallback: true,
        ..Config::default()
    };
    let service = SearchService::new(executor, config);

    let response = service
        .search(&request("C4_quarter D4_eighth E4_eighth", "rhythm"))
        .await
        .unwrap();

    assert_eq!(response.mode, "wildcard");
    assert_eq!(service_calls(&service).len(), 2);
}

#[tokio::test]
async fn short_melody_still_queries_with_empty_fingerprint() {
    let service = service(RecordingExecutor::default());

    let response = service.search(&request("C4_quarter", "melody")).await.unwrap();

    // Fewer than two pitched tokens: empty fingerprint, still issued.
    assert_eq!(response.fingerprint.as_deref(), Some(""));
    assert!(!service_calls(&service).is_empty());
}

#[tokio::test]
async fn invalid_mode_and_empty_query_are_rejected() {
    let service = service(RecordingExecutor::default());

    let err = service
        .search(&request("C4_quarter", "interval"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidMode(_)));

    let err = service.search(&request("   ", "melody")).await.unwrap_err();
    assert!(matches!(err, SearchError::EmptyQuery));

    // Validation failures never reach the executor.
    assert!(service_calls(&service).is_empty());
}

#[tokio::test]
async fn malformed_pitch_aborts_before_any_query() {
    let service = service(RecordingExecutor::default());

    let err = service
        .search(&request("C4_quarter H9_quarter", "melody"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Fingerprint(_)));
    assert!(service_calls(&service).is_empty());
}

#[tokio::test]
async fn catalog_resolves_filenames_and_surfaces_misses() {
    let entries = HashMap::from([(
        "s1".to_string(),
        "/app/corpus/prelude.musicxml".to_string(),
    )]);
    let catalog = ScoreCatalog::new(entries, "/app/corpus/");

    let executor = RecordingExecutor::with_responses(vec![vec![hit("s1", "Prelude", 2.0)]]);
    let service = service(executor).with_catalog(catalog.clone());

    let response = service
        .search(&request("C4_quarter D4_quarter", "melody"))
        .await
        .unwrap();
    assert_eq!(
        response.results[0].filename.as_deref(),
        Some("prelude.musicxml")
    );

    // A hit whose id is absent from the catalog fails the request.
    let executor = RecordingExecutor::with_responses(vec![vec![hit("ghost", "Unknown", 0.5)]]);
    let service = service_with(executor, catalog);
    let err = service
        .search(&request("C4_quarter D4_quarter", "melody"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::LookupMiss { .. }));
}

#[tokio::test]
async fn repeated_search_is_idempotent() {
    let canned = vec![hit("s1", "Prelude", 2.0), hit("s2", "Fugue", 1.0)];
    let executor =
        RecordingExecutor::with_responses(vec![canned.clone(), canned]);
    let service = service(executor);

    let req = request("C4_quarter E4_quarter", "melody");
    let first = service.search(&req).await.unwrap();
    let second = service.search(&req).await.unwrap();

    assert_eq!(first.mode, second.mode);
    assert_eq!(first.results, second.results);
}

fn service_with(
    executor: RecordingExecutor,
    catalog: ScoreCatalog,
) -> SearchService<RecordingExecutor> {
    SearchService::new(executor, Config::default()).with_catalog(catalog)
}

fn service_calls(service: &SearchService<RecordingExecutor>) -> Vec<(String, QueryAst)> {
    service.executor().calls()
}
