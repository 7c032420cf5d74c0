use anyhow::Result;
use clap::Parser;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "incipit", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Search backend URL (default: from config, http://localhost:9200)
    #[arg(long, global = true)]
    backend: Option<String>,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Compute a fingerprint for a token sequence
    ///
    /// Takes a whitespace-separated sequence of `Pitch_duration` tokens
    /// (e.g. "C4_quarter E4_quarter G4_quarter") and prints the melodic
    /// interval fingerprint or the rhythmic duration-ratio fingerprint.
    /// The same fingerprints are what the search command matches against,
    /// so this is the quickest way to see what a query will look for.
    Fingerprint {
        /// The token sequence
        tokens: String,

        /// Which fingerprint to compute
        #[arg(long, value_enum, default_value = "melody")]
        kind: commands::FingerprintKind,
    },
    /// Search the score index
    ///
    /// Runs the tiered retrieval strategy for the given mode: phrase
    /// searches raw tokens, melody and rhythm search fingerprints with an
    /// exact tier first and (for melody, or rhythm when configured) a
    /// wildcard fallback. Prints the JSON response.
    Search {
        /// The query: a token sequence, or free text for phrase mode
        query: String,

        /// Search mode
        #[arg(long, value_enum, default_value = "melody")]
        mode: commands::Mode,

        /// Positional slop passed through to the backend
        #[arg(long)]
        slop: Option<u32>,

        /// Expand a phrase query over seven scale-degree transpositions
        #[arg(long)]
        multi_key: bool,
    },
    /// Show or initialize the configuration
    Config {
        #[command(subcommand)]
        action: Option<commands::ConfigAction>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fingerprint { tokens, kind } => {
            commands::run_fingerprint(&tokens, kind)?;
        }
        Commands::Search {
            query,
            mode,
            slop,
            multi_key,
        } => {
            commands::run_search(query, mode, slop, multi_key, cli.backend).await?;
        }
        Commands::Config { action } => {
            commands::run_config(action)?;
        }
    }

    Ok(())
}
