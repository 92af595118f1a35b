//! Domain model for the Ecuador assistance-provider directory.
//!
//! Everything in this crate is synchronous and free of I/O except the
//! configuration and seed-file loaders.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod facets;
pub mod filter;
pub mod geo;
pub mod provider;
pub mod seed;
pub mod state;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use catalog::{Catalog, CatalogSource};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_FEED_URL};
pub use facets::Facets;
pub use filter::{rank_providers, FilterCriteria, SearchScope};
pub use geo::{distance_km, Coordinate, EARTH_RADIUS_KM};
pub use provider::{AnnotatedProvider, ProviderId, ProviderRecord};
pub use seed::{builtin_seed, load_seed, parse_seed, SeedFile};
pub use state::{
    LocationSource, LocationState, ManualOverridePolicy, SelectionError, SelectionState,
};

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
