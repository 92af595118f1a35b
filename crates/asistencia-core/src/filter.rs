//! The filter/rank pipeline.
//!
//! [`rank_providers`] is a pure function of the catalog, the current user
//! location and the filter criteria. Callers re-run it whenever any of the
//! three changes.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geo::{distance_km, Coordinate};
use crate::provider::{AnnotatedProvider, ProviderRecord};

/// What the free-text search box matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Provider name only.
    NameOnly,
    /// Provider name, category and city.
    #[default]
    Extended,
}

impl std::str::FromStr for SearchScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SearchScope::NameOnly),
            "extended" => Ok(SearchScope::Extended),
            other => Err(format!("expected 'name' or 'extended', got '{other}'")),
        }
    }
}

/// Snapshot of the filter inputs. Blank fields are unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub category: String,
    pub province: String,
    pub city: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [&self.search_text, &self.category, &self.province, &self.city]
            .iter()
            .all(|field| field.trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Lowercased needle for a criteria field, or `None` when the field is unset.
fn needle(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn equals_ci(value: &str, needle: &str) -> bool {
    value.trim().to_lowercase() == needle
}

/// Annotates, filters and orders the catalog.
///
/// Predicates run in a fixed order and are ANDed: free-text search, category
/// equality, province equality, city substring. With a location every result
/// carries a distance and the output is stably sorted nearest first; without
/// one no result carries a distance and catalog order is preserved.
#[must_use]
pub fn rank_providers(
    catalog: &[ProviderRecord],
    location: Option<Coordinate>,
    criteria: &FilterCriteria,
    scope: SearchScope,
) -> Vec<AnnotatedProvider> {
    let search = needle(&criteria.search_text);
    let category = needle(&criteria.category);
    let province = needle(&criteria.province);
    let city = needle(&criteria.city);

    let mut results: Vec<AnnotatedProvider> = catalog
        .iter()
        .filter(|p| {
            search.as_deref().map_or(true, |s| match scope {
                SearchScope::NameOnly => contains_ci(&p.name, s),
                SearchScope::Extended => {
                    contains_ci(&p.name, s) || contains_ci(&p.category, s) || contains_ci(&p.city, s)
                }
            })
        })
        .filter(|p| category.as_deref().map_or(true, |c| equals_ci(&p.category, c)))
        .filter(|p| province.as_deref().map_or(true, |v| equals_ci(&p.province, v)))
        .filter(|p| city.as_deref().map_or(true, |c| contains_ci(&p.city, c)))
        .map(|p| AnnotatedProvider {
            provider: p.clone(),
            distance_km: location.map(|here| distance_km(here, p.location)),
        })
        .collect();

    if location.is_some() {
        // `sort_by` is stable, so equidistant providers keep catalog order.
        results.sort_by(|a, b| match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        });
    }

    results
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
