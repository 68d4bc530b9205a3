use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use soundcue_api::{Config, SourceKind};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "soundcue", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Where records come from: "seed" (bundled sample) or "remote" (backend)
    #[arg(long, global = true)]
    source: Option<SourceKind>,

    /// Base URL of the catalog backend
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List the catalog genres with their suggested video contexts
    Genres,
    /// List the video contexts with their descriptions and genres
    Contexts,
    /// List every track in the catalog
    All,
    /// List tracks in one genre
    ///
    /// Accepts the display name ("Hip-Hop", "Old-Time Historic") or the
    /// slug ("hip-hop", "old-time-historic").
    Genre {
        /// Genre name or slug
        name: String,
    },
    /// List tracks suitable for a video context
    ///
    /// A track qualifies when its genre is one of the context's genres.
    /// Each track appears once.
    Context {
        /// Context slug, e.g. "wedding" or "gaming"
        slug: String,
    },
    /// Show one track
    Show {
        /// Track id
        id: String,
    },
    /// Search titles and artists (case-insensitive substring)
    Search {
        /// Text to look for
        query: String,
    },
    /// Show how a free-text genre label maps onto the catalog genres
    Normalize {
        /// Label as the classifier reports it, e.g. "Jazz" or "Hip Hop"
        label: String,
    },
    /// Show per-genre track counts
    ///
    /// With --source remote the backend's own totals are shown as well.
    Stats,
    /// Probe the backend's health endpoint
    Health,
    /// Inspect the genre/context tables
    Taxonomy {
        #[command(subcommand)]
        command: TaxonomyCommand,
    },
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, clap::Subcommand)]
enum TaxonomyCommand {
    /// Audit the tables and report every problem found
    Check {
        /// Tables to audit instead of the configured ones
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print the shipped tables as TOML, a starting point for an override
    Dump,
}

#[derive(Debug, clap::Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Print an example config file
    Example,
    /// Create the config file with defaults if it is missing
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(source) = cli.source {
        config.source = source;
    }
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    let json = cli.json;

    match cli.command {
        Commands::Genres => commands::browse::list_genres(&config, json)?,
        Commands::Contexts => commands::browse::list_contexts(&config, json)?,
        Commands::All => commands::browse::all(&config, json).await?,
        Commands::Genre { name } => commands::browse::by_genre(&config, &name, json).await?,
        Commands::Context { slug } => commands::browse::by_context(&config, &slug, json).await?,
        Commands::Show { id } => commands::browse::show(&config, &id, json).await?,
        Commands::Search { query } => commands::browse::search(&config, &query, json).await?,
        Commands::Normalize { label } => commands::normalize::run_normalize(&config, &label, json)?,
        Commands::Stats => commands::stats::show_stats(&config, json).await?,
        Commands::Health => commands::stats::show_health(&config, json).await?,
        Commands::Taxonomy { command } => match command {
            TaxonomyCommand::Check { file } => {
                commands::taxonomy::check(&config, file.as_deref(), json)?;
            }
            TaxonomyCommand::Dump => commands::taxonomy::dump()?,
        },
        Commands::Config { command } => match command {
            ConfigCommand::Show => commands::config::show_config(&config)?,
            ConfigCommand::Path => commands::config::show_path()?,
            ConfigCommand::Example => commands::config::show_example()?,
            ConfigCommand::Init => commands::config::init_config()?,
        },
    }

    Ok(())
}
