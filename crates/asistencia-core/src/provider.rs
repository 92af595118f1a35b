use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Identifier of a provider within one catalog snapshot.
///
/// Ids are generated at load time and never survive a reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderId(String);

impl ProviderId {
    /// Generates a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProviderId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ProviderId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One assistance provider as loaded from the seed or the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderRecord {
    pub id: ProviderId,
    pub name: String,
    /// Free-form; usually one of [`crate::facets::KNOWN_CATEGORIES`].
    pub category: String,
    pub city: String,
    pub province: String,
    pub location: Coordinate,
    pub contact_phone: String,
    pub address: Option<String>,
    pub contact_name: Option<String>,
}

/// A provider annotated with its distance from the current user location.
///
/// `distance_km` is `None` when no location is known.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedProvider {
    #[serde(flatten)]
    pub provider: ProviderRecord,
    pub distance_km: Option<f64>,
}

impl AnnotatedProvider {
    #[must_use]
    pub fn id(&self) -> &ProviderId {
        &self.provider.id
    }

    /// Distance formatted for list display, e.g. `"12.3 km"`.
    #[must_use]
    pub fn distance_label(&self) -> Option<String> {
        self.distance_km.map(|d| format!("{d:.1} km"))
    }
}
