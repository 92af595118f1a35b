use std::path::PathBuf;

use crate::filter::SearchScope;
use crate::geo::Coordinate;
use crate::state::ManualOverridePolicy;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub feed_url: String,
    pub seed_path: Option<PathBuf>,
    pub feed_timeout_secs: u64,
    pub feed_user_agent: String,
    pub feed_max_retries: u32,
    pub feed_backoff_base_ms: u64,
    pub fallback_location: Coordinate,
    pub manual_override: ManualOverridePolicy,
    pub search_scope: SearchScope,
    pub gemini_api_key: Option<String>,
    pub assist_model: String,
    pub assist_base_url: String,
    pub assist_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("feed_url", &self.feed_url)
            .field("seed_path", &self.seed_path)
            .field("feed_timeout_secs", &self.feed_timeout_secs)
            .field("feed_user_agent", &self.feed_user_agent)
            .field("feed_max_retries", &self.feed_max_retries)
            .field("feed_backoff_base_ms", &self.feed_backoff_base_ms)
            .field("fallback_location", &self.fallback_location)
            .field("manual_override", &self.manual_override)
            .field("search_scope", &self.search_scope)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("assist_model", &self.assist_model)
            .field("assist_base_url", &self.assist_base_url)
            .field("assist_timeout_secs", &self.assist_timeout_secs)
            .finish()
    }
}
