mod explore;
mod list;

use asistencia_assist::AssistClient;
use asistencia_core::{
    builtin_seed, load_seed, AppConfig, Catalog, Coordinate, FilterCriteria, LocationState,
    ManualOverridePolicy,
};
use asistencia_feed::{CatalogLoader, FeedClient};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "asistencia")]
#[command(about = "Directory of roadside, medical and insurance assistance providers in Ecuador")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print providers ranked by distance
    List(ListArgs),
    /// Print the values available to each filter
    Facets,
    /// Ask the assistant which kind of provider fits a problem
    Assist {
        /// Free-text description of the problem
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Interactive session over stdin against an offscreen map
    Explore {
        /// Starting position, as from a device fix (e.g. -0.18,-78.47)
        #[arg(long, allow_hyphen_values = true)]
        near: Option<Coordinate>,
    },
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Substring to look for in names (and categories/cities in extended scope)
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    province: Option<String>,
    /// Substring of the city name
    #[arg(long)]
    city: Option<String>,
    /// Rank from this position instead of the fallback (e.g. -0.18,-78.47)
    #[arg(long, allow_hyphen_values = true)]
    near: Option<Coordinate>,
    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search_text: self.search.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            province: self.province.clone().unwrap_or_default(),
            city: self.city.clone().unwrap_or_default(),
        }
    }
}

/// Loads the catalog from the feed, falling back to the configured seed.
async fn load_catalog(config: &AppConfig) -> anyhow::Result<Catalog> {
    let seed = match &config.seed_path {
        Some(path) => load_seed(path)?,
        None => builtin_seed(),
    };
    let client = FeedClient::from_config(config)?;
    let loader = CatalogLoader::new(client, config.feed_url.clone()).with_seed(seed);
    Ok(loader.load().await)
}

/// The fallback position, replaced by `near` when given.
fn resolve_location(
    policy: ManualOverridePolicy,
    fallback: Coordinate,
    near: Option<Coordinate>,
) -> LocationState {
    let mut location = LocationState::new(policy);
    location.apply_default(fallback);
    if let Some(at) = near {
        location.apply_geolocation(at);
    }
    location
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = asistencia_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::List(args)) => {
            let catalog = load_catalog(&config).await?;
            let location =
                resolve_location(config.manual_override, config.fallback_location, args.near);
            list::run_list(&catalog, &location, &args.criteria(), config.search_scope, args.json)?;
        }
        Some(Commands::Facets) => {
            let catalog = load_catalog(&config).await?;
            list::run_facets(&catalog);
        }
        Some(Commands::Assist { query }) => {
            let client = AssistClient::from_config(&config)?;
            println!("{}", client.suggest(&query.join(" ")).await);
        }
        Some(Commands::Explore { near }) => {
            let catalog = load_catalog(&config).await?;
            explore::run_explore(catalog, &config, near)?;
        }
        None => println!("asistencia: run with --help to see the available commands"),
    }

    Ok(())
}
