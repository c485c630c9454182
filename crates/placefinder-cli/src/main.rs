mod catalog;
mod geocode;

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use placefinder_core::Environment;
use placefinder_nominatim::CancelToken;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "placefinder")]
#[command(about = "Geocode places through Nominatim and search the local place catalog")]
struct Cli {
    /// Catalog YAML file (overrides `PLACEFINDER_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a single OSM object
    Lookup {
        /// Node, way, or relation (`N`, `W`, `R` also accepted)
        #[arg(long)]
        osm_type: String,
        #[arg(long)]
        osm_id: String,
    },
    /// Free-text geocoding search
    Geocode { query: String },
    /// Geocoding search around a point, nearest results first
    GeocodeNear {
        query: String,
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Great-circle distance between two points, in miles
    Distance {
        #[arg(long, allow_negative_numbers = true)]
        lat1: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon1: f64,
        #[arg(long, allow_negative_numbers = true)]
        lat2: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon2: f64,
    },
    /// Rank catalog places by relevance to a query
    Search { query: String },
    /// Catalog search limited to a radius around a point
    SearchNear {
        query: String,
        #[command(flatten)]
        area: AreaArgs,
    },
    /// Every catalog place within a radius, ignoring text
    Near {
        #[command(flatten)]
        area: AreaArgs,
        /// Sort nearest first instead of the default farthest first
        #[arg(long)]
        nearest_first: bool,
    },
}

#[derive(Debug, Clone, Copy, Args)]
struct AreaArgs {
    #[arg(long, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, allow_negative_numbers = true)]
    lon: f64,
    /// Search radius in miles, between 0.1 and 400
    #[arg(long, default_value_t = 10.0)]
    radius: f64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = placefinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_ansi_logs(&config.env))
        .with_target(config.env != Environment::Development)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let catalog_path = cli.catalog.unwrap_or_else(|| config.catalog_path.clone());

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Lookup { osm_type, osm_id } => {
            let client = geocode::build_client(&config, interrupt_token())?;
            geocode::run_lookup(&client, &osm_type, &osm_id).await?;
        }
        Commands::Geocode { query } => {
            let client = geocode::build_client(&config, interrupt_token())?;
            geocode::run_geocode(&client, &query).await?;
        }
        Commands::GeocodeNear { query, area } => {
            let client = geocode::build_client(&config, interrupt_token())?;
            geocode::run_geocode_near(&client, &query, area).await?;
        }
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => geocode::run_distance(lat1, lon1, lat2, lon2)?,
        Commands::Search { query } => catalog::run_search(&catalog_path, &query).await?,
        Commands::SearchNear { query, area } => {
            catalog::run_search_near(&catalog_path, &query, area).await?;
        }
        Commands::Near {
            area,
            nearest_first,
        } => catalog::run_near(&catalog_path, area, nearest_first).await?,
    }

    Ok(())
}

/// ANSI colors only in development.
fn use_ansi_logs(env: &Environment) -> bool {
    *env == Environment::Development
}

/// Token that fires on Ctrl-C so an in-flight area search stops promptly.
fn interrupt_token() -> CancelToken {
    let token = CancelToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling geocoding requests");
            on_interrupt.cancel();
        }
    });
    token
}

/// Pretty-prints `value` as JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests;
