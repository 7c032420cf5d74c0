//! Tiered retrieval for incipit.
//!
//! This crate turns a raw query plus a search mode into an ordered plan of
//! candidate index queries (exact phrase first, wildcard fallback after),
//! evaluates the plan against an external search engine through the
//! [`SearchExecutor`] seam, and maps raw hits into uniform results. The
//! fingerprint generators it plans around live in `incipit-core`.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod config;
pub mod elastic;
pub mod error;
pub mod executor;
pub mod query;
pub mod strategy;
pub mod tier;

pub use catalog::ScoreCatalog;
pub use config::Config;
pub use elastic::ElasticExecutor;
pub use error::SearchError;
pub use executor::{ExecuteError, RankedHit, ScoreDoc, SearchExecutor};
pub use query::QueryAst;
pub use strategy::{SearchMode, SearchRequest, SearchResponse, SearchResult, SearchService};
pub use tier::{SearchTier, TierLabel};
