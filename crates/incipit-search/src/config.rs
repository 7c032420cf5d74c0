use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for incipit.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (INCIPIT_* prefix)
/// 3. Config file (~/.config/incipit/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the search backend.
    #[serde(default = "default_elasticsearch_url")]
    pub elasticsearch_url: String,

    /// Index holding the raw score token documents (phrase search).
    #[serde(default = "default_score_index")]
    pub score_index: String,

    /// Index holding the interval and rhythm fingerprint fields.
    #[serde(default = "default_fingerprint_index")]
    pub fingerprint_index: String,

    /// Maximum hits requested per tier.
    #[serde(default = "default_max_hits")]
    pub max_hits: usize,

    /// Whether rhythm search escalates to a wildcard tier when the exact
    /// tier is empty, like melody search does. Off by default.
    #[serde(default)]
    pub rhythm_wildcard_fallback: bool,

    /// Prefix stripped from catalog paths when resolving filenames.
    #[serde(default = "default_corpus_prefix")]
    pub corpus_prefix: String,

    /// Path to the id→file JSON catalog. When unset, results carry no
    /// filename.
    pub catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            elasticsearch_url: default_elasticsearch_url(),
            score_index: default_score_index(),
            fingerprint_index: default_fingerprint_index(),
            max_hits: default_max_hits(),
            rhythm_wildcard_fallback: false,
            corpus_prefix: default_corpus_prefix(),
            catalog_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/incipit/config.toml
    /// Reads environment variables with INCIPIT_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("incipit");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with the backend URL overridden from the CLI.
    pub fn load_with_url(url: String) -> Result<Self> {
        let mut config = Self::load()?;
        config.elasticsearch_url = url;
        Ok(config)
    }
}

fn default_elasticsearch_url() -> String {
    "http://localhost:9200".to_string()
}

fn default_score_index() -> String {
    "musicxml".to_string()
}

fn default_fingerprint_index() -> String {
    "musicxml_intervals".to_string()
}

fn default_max_hits() -> usize {
    10
}

fn default_corpus_prefix() -> String {
    "/app/corpus/".to_string()
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/incipit/config.toml
/// - macOS: ~/Library/Application Support/incipit/config.toml
/// - Windows: %APPDATA%\incipit\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("incipit")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Incipit Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (INCIPIT_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Base URL of the Elasticsearch-compatible search backend
#elasticsearch_url = "http://localhost:9200"

# Index holding the raw score token documents (phrase search)
#score_index = "musicxml"

# Index holding the interval_fp / rhythm_fp fingerprint fields
#fingerprint_index = "musicxml_intervals"

# Maximum hits requested per tier
#max_hits = 10

# Escalate rhythm search to a wildcard tier when the exact tier is empty,
# like melody search does
#rhythm_wildcard_fallback = false

# Prefix stripped from catalog paths when resolving result filenames
#corpus_prefix = "/app/corpus/"

# Path to the id -> file JSON catalog; leave unset to omit filenames
#catalog_path = "/var/lib/incipit/catalog.json"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.elasticsearch_url, "http://localhost:9200");
        assert_eq!(config.score_index, "musicxml");
        assert_eq!(config.max_hits, 10);
        assert!(!config.rhythm_wildcard_fallback);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_url_override() {
        let config = Config::load_with_url("http://search:9200".to_string());
        assert!(config.is_ok());
        assert_eq!(config.unwrap().elasticsearch_url, "http://search:9200");
    }
}
