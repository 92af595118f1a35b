//! HTTP client for the published provider spreadsheet.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::FeedError;
use crate::retry::retry_with_backoff;

/// Fetches the raw CSV text of the provider feed.
///
/// Transient errors (network failures, 429, 5xx) are retried with jittered
/// exponential back-off up to `max_retries` additional attempts.
pub struct FeedClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FeedClient {
    /// Creates a `FeedClient` with configured timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn from_config(config: &asistencia_core::AppConfig) -> Result<Self, FeedError> {
        Self::new(
            config.feed_timeout_secs,
            &config.feed_user_agent,
            config.feed_max_retries,
            config.feed_backoff_base_ms,
        )
    }

    /// Downloads the feed body as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::InvalidUrl`] if `url` does not parse.
    /// - [`FeedError::NotFound`] on HTTP 404 (not retried).
    /// - [`FeedError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`FeedError::Http`] on network failure after all retries.
    pub async fn fetch_text(&self, url: &str) -> Result<String, FeedError> {
        let parsed = Url::parse(url).map_err(|e| FeedError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let parsed = parsed.clone();
            async move {
                let response = self
                    .client
                    .get(parsed.clone())
                    .header(reqwest::header::ACCEPT, "text/csv,text/plain;q=0.9,*/*;q=0.8")
                    .header(reqwest::header::CACHE_CONTROL, "no-cache")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(FeedError::NotFound {
                        url: parsed.to_string(),
                    });
                }
                if !status.is_success() {
                    return Err(FeedError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: parsed.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}
