//! Immutable provider catalog snapshots.

use std::collections::HashSet;

use crate::provider::{ProviderId, ProviderRecord};

/// Where a catalog snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    Seed,
    Feed,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Seed => write!(f, "seed"),
            CatalogSource::Feed => write!(f, "feed"),
        }
    }
}

/// The full set of providers from one load.
///
/// A catalog is never edited; a reload builds a new one and replaces it whole.
#[derive(Debug, Clone)]
pub struct Catalog {
    providers: Vec<ProviderRecord>,
    source: CatalogSource,
}

impl Catalog {
    /// Wraps a loaded record list.
    ///
    /// Records sharing an id with an earlier record are dropped so the
    /// per-snapshot uniqueness of ids holds even for hand-built input.
    #[must_use]
    pub fn new(providers: Vec<ProviderRecord>, source: CatalogSource) -> Self {
        let mut seen: HashSet<ProviderId> = HashSet::with_capacity(providers.len());
        let providers = providers
            .into_iter()
            .filter(|p| seen.insert(p.id.clone()))
            .collect();
        Self { providers, source }
    }

    #[must_use]
    pub fn empty(source: CatalogSource) -> Self {
        Self {
            providers: Vec::new(),
            source,
        }
    }

    #[must_use]
    pub fn providers(&self) -> &[ProviderRecord] {
        &self.providers
    }

    #[must_use]
    pub fn source(&self) -> CatalogSource {
        self.source
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ProviderId) -> Option<&ProviderRecord> {
        self.providers.iter().find(|p| &p.id == id)
    }
}
