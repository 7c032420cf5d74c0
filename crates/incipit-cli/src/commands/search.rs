use anyhow::{Context, Result};
use clap::ValueEnum;

use incipit_search::{Config, ElasticExecutor, ScoreCatalog, SearchRequest, SearchService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Phrase,
    Melody,
    Rhythm,
}

impl Mode {
    fn as_wire(self) -> &'static str {
        match self {
            Self::Phrase => "phrase",
            Self::Melody => "melody",
            Self::Rhythm => "rhythm",
        }
    }
}

pub async fn run_search(
    query: String,
    mode: Mode,
    slop: Option<u32>,
    multi_key: bool,
    backend: Option<String>,
) -> Result<()> {
    let config = match backend {
        Some(url) => Config::load_with_url(url)?,
        None => Config::load()?,
    };

    let executor = ElasticExecutor::new(config.elasticsearch_url.as_str())
        .context("Failed to create search backend client")?;

    let mut service = SearchService::new(executor, config.clone());
    if let Some(path) = &config.catalog_path {
        let catalog = ScoreCatalog::load(path, config.corpus_prefix.clone())?;
        service = service.with_catalog(catalog);
    }

    let request = SearchRequest {
        query,
        search_type: mode.as_wire().to_string(),
        multi_key,
        slop,
    };

    log::info!("searching {} via {}", mode.as_wire(), config.elasticsearch_url);
    let response = service.search(&request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
