//! Filter options derived from a catalog.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::provider::ProviderRecord;

/// Categories offered even when the catalog has no provider in them.
pub const KNOWN_CATEGORIES: [&str; 5] = ["Grúa", "Médica", "Auxilio Vial", "Dental", "Seguro"];

/// The 24 provinces of Ecuador.
pub const ECUADOR_PROVINCES: [&str; 24] = [
    "Azuay",
    "Bolívar",
    "Cañar",
    "Carchi",
    "Chimborazo",
    "Cotopaxi",
    "El Oro",
    "Esmeraldas",
    "Galápagos",
    "Guayas",
    "Imbabura",
    "Loja",
    "Los Ríos",
    "Manabí",
    "Morona Santiago",
    "Napo",
    "Orellana",
    "Pastaza",
    "Pichincha",
    "Santa Elena",
    "Santo Domingo de los Tsáchilas",
    "Sucumbíos",
    "Tungurahua",
    "Zamora Chinchipe",
];

/// Distinct, sorted picker values for the category, province and city filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub provinces: Vec<String>,
    pub cities: Vec<String>,
}

impl Facets {
    /// Merges the built-in lists with whatever the catalog actually contains.
    #[must_use]
    pub fn from_catalog(providers: &[ProviderRecord]) -> Self {
        let mut categories: BTreeSet<String> =
            KNOWN_CATEGORIES.iter().map(|c| (*c).to_string()).collect();
        let mut provinces: BTreeSet<String> =
            ECUADOR_PROVINCES.iter().map(|p| (*p).to_string()).collect();
        let mut cities: BTreeSet<String> = BTreeSet::new();

        for p in providers {
            insert_non_blank(&mut categories, &p.category);
            insert_non_blank(&mut provinces, &p.province);
            insert_non_blank(&mut cities, &p.city);
        }

        Self {
            categories: categories.into_iter().collect(),
            provinces: provinces.into_iter().collect(),
            cities: cities.into_iter().collect(),
        }
    }
}

fn insert_non_blank(set: &mut BTreeSet<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        set.insert(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::provider::ProviderId;

    fn record(category: &str, city: &str, province: &str) -> ProviderRecord {
        ProviderRecord {
            id: ProviderId::generate(),
            name: "x".to_string(),
            category: category.to_string(),
            city: city.to_string(),
            province: province.to_string(),
            location: Coordinate {
                lat: -1.0,
                lng: -79.0,
            },
            contact_phone: String::new(),
            address: None,
            contact_name: None,
        }
    }

    #[test]
    fn empty_catalog_still_offers_builtin_lists() {
        let facets = Facets::from_catalog(&[]);
        assert_eq!(facets.categories.len(), KNOWN_CATEGORIES.len());
        assert_eq!(facets.provinces.len(), ECUADOR_PROVINCES.len());
        assert!(facets.cities.is_empty());
    }

    #[test]
    fn catalog_values_are_merged_and_deduplicated() {
        let facets = Facets::from_catalog(&[
            record("Cerrajería", "Quito", "Pichincha"),
            record("Grúa", "Quito", "Pichincha"),
            record("Grúa", "Ambato", ""),
        ]);
        assert!(facets.categories.contains(&"Cerrajería".to_string()));
        assert_eq!(facets.categories.len(), KNOWN_CATEGORIES.len() + 1);
        assert_eq!(facets.provinces.len(), ECUADOR_PROVINCES.len());
        assert_eq!(facets.cities, vec!["Ambato".to_string(), "Quito".to_string()]);
    }
}
