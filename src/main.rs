use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use player_stats_api::api::{build_router, cors_layer, state::AppState};
use player_stats_api::config::AppConfig;
use player_stats_api::models::{ActivityFilter, PerMode, SeasonSelector, SeasonType};
use player_stats_api::pipeline::{self, AdvancedQuery, CareerQuery, Pagination, RosterQuery};
use player_stats_api::upstream::{NbaStatsClient, StatsProvider};

#[derive(Parser)]
#[command(name = "player-stats-api")]
#[command(about = "Read-only HTTP API over NBA player statistics")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (defaults to the configured host)
        #[arg(long)]
        host: Option<String>,

        /// Port number (defaults to the configured port)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run a single query against the upstream API and print JSON
    Query {
        #[command(subcommand)]
        action: QueryAction,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(Subcommand)]
enum QueryAction {
    /// List players
    Players {
        /// Only active (true) or inactive (false) players
        #[arg(long)]
        active: Option<bool>,

        /// Case-insensitive name fragment
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        limit: Option<usize>,

        #[arg(long)]
        page: Option<usize>,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Player profile by id or name
    Info {
        #[arg(long)]
        id: Option<u32>,

        #[arg(long)]
        name: Option<String>,
    },

    /// Career totals or per-season stats
    Career {
        id: String,

        /// "Regular Season", "Pre Season" or "Playoffs"
        #[arg(long)]
        season_type: Option<String>,

        /// "All" for every season, or a season like "2023-24"
        #[arg(long)]
        season: Option<String>,

        #[arg(long)]
        page: Option<usize>,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Advanced dashboard stats
    Advanced {
        id: u32,

        /// e.g. "Totals", "PerGame", "Per36"
        #[arg(long, default_value = "Totals")]
        per_mode: String,

        #[arg(long)]
        season: Option<String>,

        #[arg(long, default_value = "Regular Season")]
        season_type: String,
    },

    /// Award summary
    Awards {
        id: u32,

        /// Include the raw award records
        #[arg(long)]
        detailed: bool,
    },
}

/// Parse a wire-format enum value ("Playoffs", "PerGame") from the command line.
fn parse_wire<T: serde::de::DeserializeOwned>(value: &str, what: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .with_context(|| format!("Invalid {}: {}", what, value))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_query(provider: &dyn StatsProvider, action: QueryAction) -> Result<()> {
    match action {
        QueryAction::Players {
            active,
            name,
            limit,
            page,
            page_size,
        } => {
            let query = RosterQuery {
                activity: ActivityFilter::from(active),
                name,
                limit,
                pagination: Pagination::new(page, page_size),
            };
            print_json(&pipeline::list_players(provider, &query).await?)
        }
        QueryAction::Info { id, name } => {
            print_json(&pipeline::resolve(provider, id, name.as_deref()).await?)
        }
        QueryAction::Career {
            id,
            season_type,
            season,
            page,
            page_size,
        } => {
            let season_type: Option<SeasonType> = season_type
                .map(|s| parse_wire(&s, "season type"))
                .transpose()?;
            let query = CareerQuery {
                season_type,
                season: SeasonSelector::parse(season.as_deref()),
                pagination: Pagination::new(page, page_size),
                ..CareerQuery::new(id)
            };
            print_json(&pipeline::career_stats(provider, &query).await?)
        }
        QueryAction::Advanced {
            id,
            per_mode,
            season,
            season_type,
        } => {
            let query = AdvancedQuery {
                player_id: id,
                per_mode: parse_wire::<PerMode>(&per_mode, "per mode")?,
                season: SeasonSelector::parse(season.as_deref()),
                season_type: parse_wire(&season_type, "season type")?,
            };
            print_json(&pipeline::advanced_stats(provider, &query).await?)
        }
        QueryAction::Awards { id, detailed } => {
            print_json(&pipeline::player_awards(provider, Some(id), detailed).await?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Loading config from {}", cli.config.display()))?;

    // Initialize tracing
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting player-stats-api v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let provider = NbaStatsClient::new(&config.upstream)?;
            tracing::info!("Upstream: {}", config.upstream.base_url);

            let state = AppState::new(Arc::new(provider));
            let app = build_router(state).layer(cors_layer(&config.server.cors_origin));

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Query { action } => {
            let provider = NbaStatsClient::new(&config.upstream)?;
            tracing::debug!("Querying {}", provider.name());
            run_query(&provider, action).await?;
        }
        Commands::ShowConfig => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
