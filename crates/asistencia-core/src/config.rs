use crate::app_config::{AppConfig, Environment};
use crate::filter::SearchScope;
use crate::geo::Coordinate;
use crate::state::ManualOverridePolicy;
use crate::ConfigError;

/// Published CSV export of the provider spreadsheet.
pub const DEFAULT_FEED_URL: &str =
    "https://docs.google.com/spreadsheets/d/1xi__RmraqJ9sVinB2Ow0P6wynpTIsKgJH4XJRryHS6k/export?format=csv";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("ASISTENCIA_ENV", "development"))?;
    let log_level = or_default("ASISTENCIA_LOG_LEVEL", "info");

    let feed_url = or_default("ASISTENCIA_FEED_URL", DEFAULT_FEED_URL);
    let seed_path = lookup("ASISTENCIA_SEED_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let feed_timeout_secs = parse_u64("ASISTENCIA_FEED_TIMEOUT_SECS", "30")?;
    let feed_user_agent = or_default(
        "ASISTENCIA_FEED_USER_AGENT",
        "asistencia/0.1 (provider-directory)",
    );
    let feed_max_retries = parse_u32("ASISTENCIA_FEED_MAX_RETRIES", "2")?;
    let feed_backoff_base_ms = parse_u64("ASISTENCIA_FEED_BACKOFF_BASE_MS", "500")?;

    let fallback_lat = parse_f64("ASISTENCIA_FALLBACK_LAT", "-1.8312")?;
    let fallback_lng = parse_f64("ASISTENCIA_FALLBACK_LNG", "-78.1834")?;
    let fallback_location =
        Coordinate::new(fallback_lat, fallback_lng).map_err(|e| ConfigError::InvalidEnvVar {
            var: "ASISTENCIA_FALLBACK_LAT/ASISTENCIA_FALLBACK_LNG".to_string(),
            reason: e.to_string(),
        })?;

    let manual_override = or_default("ASISTENCIA_MANUAL_OVERRIDE", "sticky")
        .parse::<ManualOverridePolicy>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "ASISTENCIA_MANUAL_OVERRIDE".to_string(),
            reason,
        })?;
    let search_scope = or_default("ASISTENCIA_SEARCH_SCOPE", "extended")
        .parse::<SearchScope>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "ASISTENCIA_SEARCH_SCOPE".to_string(),
            reason,
        })?;

    let gemini_api_key = lookup("GEMINI_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let assist_model = or_default("ASISTENCIA_ASSIST_MODEL", "gemini-3-flash-preview");
    let assist_base_url = or_default(
        "ASISTENCIA_ASSIST_BASE_URL",
        "https://generativelanguage.googleapis.com",
    );
    let assist_timeout_secs = parse_u64("ASISTENCIA_ASSIST_TIMEOUT_SECS", "20")?;

    Ok(AppConfig {
        env,
        log_level,
        feed_url,
        seed_path,
        feed_timeout_secs,
        feed_user_agent,
        feed_max_retries,
        feed_backoff_base_ms,
        fallback_location,
        manual_override,
        search_scope,
        gemini_api_key,
        assist_model,
        assist_base_url,
        assist_timeout_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "ASISTENCIA_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
