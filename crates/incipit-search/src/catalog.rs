//! Read-only id→path lookup for rendering hit filenames.
//!
//! The catalog is produced by the indexing side and loaded here once per
//! process; the strategy never writes it. Paths in the catalog carry the
//! corpus mount prefix, which is stripped so results reference files the
//! way the serving layer exposes them.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::error::SearchError;

/// Immutable mapping from score id to corpus file path.
#[derive(Debug, Clone)]
pub struct ScoreCatalog {
    entries: HashMap<String, String>,
    corpus_prefix: String,
}

impl ScoreCatalog {
    #[must_use]
    pub fn new(entries: HashMap<String, String>, corpus_prefix: impl Into<String>) -> Self {
        Self {
            entries,
            corpus_prefix: corpus_prefix.into(),
        }
    }

    /// Load the catalog from a JSON object file of `{ "id": "path", ... }`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path, corpus_prefix: impl Into<String>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read score catalog: {}", path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse score catalog: {}", path.display()))?;

        log::info!("loaded score catalog with {} entries", entries.len());
        Ok(Self::new(entries, corpus_prefix))
    }

    /// Resolve a score id to its corpus-relative filename.
    ///
    /// # Errors
    /// Returns [`SearchError::LookupMiss`] when the id has no entry; absent
    /// mappings are surfaced, never silently dropped.
    pub fn filename(&self, id: &str) -> std::result::Result<String, SearchError> {
        let path = self.entries.get(id).ok_or_else(|| SearchError::LookupMiss {
            id: id.to_string(),
        })?;
        Ok(path
            .strip_prefix(&self.corpus_prefix)
            .unwrap_or(path)
            .to_string())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
