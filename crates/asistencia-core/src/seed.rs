//! Seed providers used when the external feed is unavailable.
//!
//! The built-in seed is empty: the directory never invents providers. A
//! deployment can point `ASISTENCIA_SEED_PATH` at a curated YAML file instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;
use crate::provider::{ProviderId, ProviderRecord};
use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedProvider {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub contact_phone: String,
    pub address: Option<String>,
    pub contact_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub providers: Vec<SeedProvider>,
}

/// The built-in seed sequence.
#[must_use]
pub fn builtin_seed() -> Vec<ProviderRecord> {
    Vec::new()
}

/// Load and validate a YAML seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed(path: &Path) -> Result<Vec<ProviderRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_seed(&content)
}

/// Parse and validate seed YAML, assigning a fresh id to every record.
///
/// # Errors
///
/// Returns [`ConfigError::SeedFileParse`] for malformed YAML and
/// [`ConfigError::Validation`] for blank names or out-of-range coordinates.
pub fn parse_seed(content: &str) -> Result<Vec<ProviderRecord>, ConfigError> {
    let seed: SeedFile = serde_yaml::from_str(content)?;

    seed.providers
        .into_iter()
        .map(|p| {
            if p.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "seed provider name must be non-empty".to_string(),
                ));
            }
            let location = Coordinate::new(p.lat, p.lng).map_err(|e| {
                ConfigError::Validation(format!("seed provider '{}': {e}", p.name))
            })?;
            Ok(ProviderRecord {
                id: ProviderId::generate(),
                name: p.name,
                category: p.category,
                city: p.city,
                province: p.province,
                location,
                contact_phone: p.contact_phone,
                address: p.address,
                contact_name: p.contact_name,
            })
        })
        .collect()
}
