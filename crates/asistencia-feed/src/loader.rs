//! Catalog loading with seed fallback.

use asistencia_core::{Catalog, CatalogSource, ProviderId, ProviderRecord};

use crate::client::FeedClient;
use crate::normalize::providers_from_csv;

/// Builds a fresh [`Catalog`] from the feed, or from the seed when the feed
/// is unreachable or has no usable rows.
pub struct CatalogLoader {
    client: FeedClient,
    feed_url: Option<String>,
    seed: Vec<ProviderRecord>,
}

impl CatalogLoader {
    /// A loader that fetches `feed_url` and falls back to an empty seed.
    #[must_use]
    pub fn new(client: FeedClient, feed_url: impl Into<String>) -> Self {
        Self {
            client,
            feed_url: Some(feed_url.into()),
            seed: Vec::new(),
        }
    }

    /// A loader that never touches the network.
    #[must_use]
    pub fn seed_only(client: FeedClient) -> Self {
        Self {
            client,
            feed_url: None,
            seed: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Vec<ProviderRecord>) -> Self {
        self.seed = seed;
        self
    }

    /// Loads one catalog snapshot. Never fails: feed problems are logged and
    /// resolved by falling back to the seed.
    pub async fn load(&self) -> Catalog {
        if let Some(url) = &self.feed_url {
            match self.client.fetch_text(url).await {
                Ok(text) => {
                    let providers = providers_from_csv(&text);
                    if !providers.is_empty() {
                        tracing::info!(count = providers.len(), "catalog loaded from feed");
                        return Catalog::new(providers, CatalogSource::Feed);
                    }
                    tracing::warn!(url = %url, "feed has no usable rows, using seed");
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "feed unavailable, using seed");
                }
            }
        }
        self.seed_catalog()
    }

    fn seed_catalog(&self) -> Catalog {
        let providers: Vec<ProviderRecord> = self
            .seed
            .iter()
            .cloned()
            .map(|mut p| {
                p.id = ProviderId::generate();
                p
            })
            .collect();
        tracing::info!(count = providers.len(), "catalog loaded from seed");
        Catalog::new(providers, CatalogSource::Seed)
    }
}
