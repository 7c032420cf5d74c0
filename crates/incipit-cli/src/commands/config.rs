use anyhow::{Context, Result};
use clap::Subcommand;

use incipit_search::config;
use incipit_search::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ConfigAction {
    /// Create the config file with documented defaults
    Init,
    /// Print the config file path
    Path,
    /// Print the raw config file contents
    Show,
}

/// Show the effective configuration, or run a config sub-action.
pub fn run_config(action: Option<ConfigAction>) -> Result<()> {
    match action {
        None => show_effective(),
        Some(ConfigAction::Init) => {
            let created = config::ensure_config_file()?;
            let path = config::config_file_path();
            if created {
                println!("Created {}", path.display());
            } else {
                println!("Already exists: {}", path.display());
            }
            Ok(())
        }
        Some(ConfigAction::Path) => {
            println!("{}", config::config_file_path().display());
            Ok(())
        }
        Some(ConfigAction::Show) => {
            let path = config::config_file_path();
            if path.exists() {
                let contents = std::fs::read_to_string(&path)
                    .context("Failed to read config file")?;
                print!("{contents}");
            } else {
                println!("Config file does not exist: {}", path.display());
                println!("\nRun 'incipit config init' to create it.");
            }
            Ok(())
        }
    }
}

fn show_effective() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());
    let exists = config::config_file_path().exists();
    println!(
        "File exists: {}\n",
        if exists { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!("  elasticsearch_url: {}", config.elasticsearch_url);
    println!("  score_index: {}", config.score_index);
    println!("  fingerprint_index: {}", config.fingerprint_index);
    println!("  max_hits: {}", config.max_hits);
    println!(
        "  rhythm_wildcard_fallback: {}",
        config.rhythm_wildcard_fallback
    );
    println!("  corpus_prefix: {}", config.corpus_prefix);
    println!(
        "  catalog_path: {}",
        config
            .catalog_path
            .as_ref()
            .map_or_else(|| "<not set>".to_string(), |p| p.display().to_string())
    );

    println!("\nPriority: CLI args > ENV vars (INCIPIT_*) > Config file > Defaults");

    Ok(())
}
