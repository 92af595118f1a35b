use super::*;
use crate::provider::ProviderId;

fn provider(id: &str, name: &str, category: &str, city: &str, province: &str, lat: f64, lng: f64) -> ProviderRecord {
    ProviderRecord {
        id: ProviderId::from(id),
        name: name.to_string(),
        category: category.to_string(),
        city: city.to_string(),
        province: province.to_string(),
        location: Coordinate { lat, lng },
        contact_phone: "099".to_string(),
        address: None,
        contact_name: None,
    }
}

fn catalog() -> Vec<ProviderRecord> {
    vec![
        provider("a", "Grúas Andinas", "Grúa", "Quito", "Pichincha", -0.18, -78.47),
        provider("b", "Clínica del Puerto", "Médica", "Guayaquil", "Guayas", -2.19, -79.89),
        provider("c", "Auxilio Express", "Auxilio Vial", "Cuenca", "Azuay", -2.90, -79.00),
        provider("d", "Sonrisa Dental", "Dental", "Quito", "Pichincha", -0.22, -78.51),
    ]
}

fn ids(results: &[AnnotatedProvider]) -> Vec<&str> {
    results.iter().map(|r| r.id().as_str()).collect()
}

const QUITO: Coordinate = Coordinate {
    lat: -0.1807,
    lng: -78.4678,
};

#[test]
fn empty_criteria_without_location_returns_catalog_order() {
    let results = rank_providers(&catalog(), None, &FilterCriteria::default(), SearchScope::Extended);
    assert_eq!(ids(&results), vec!["a", "b", "c", "d"]);
    assert!(results.iter().all(|r| r.distance_km.is_none()));
}

#[test]
fn category_filter_scenario_returns_only_tow_provider() {
    let catalog = vec![
        provider("A", "A", "Grúa", "Quito", "Pichincha", -0.18, -78.47),
        provider("B", "B", "Médica", "Guayaquil", "Guayas", -2.19, -79.89),
    ];
    let here = Coordinate { lat: -1.0, lng: -79.0 };
    let criteria = FilterCriteria {
        category: "Grúa".to_string(),
        ..FilterCriteria::default()
    };

    let results = rank_providers(&catalog, Some(here), &criteria, SearchScope::Extended);

    assert_eq!(ids(&results), vec!["A"]);
    let expected = distance_km(here, catalog[0].location);
    assert_eq!(results[0].distance_km, Some(expected));
}

#[test]
fn location_sorts_nearest_first() {
    let results = rank_providers(&catalog(), Some(QUITO), &FilterCriteria::default(), SearchScope::Extended);
    assert_eq!(ids(&results), vec!["a", "d", "b", "c"]);
    let distances: Vec<f64> = results.iter().map(|r| r.distance_km.unwrap()).collect();
    assert!(distances.windows(2).all(|w| w[0] <= w[1]), "{distances:?}");
}

#[test]
fn equidistant_providers_keep_catalog_order() {
    let catalog = vec![
        provider("x", "X", "Grúa", "Quito", "Pichincha", -0.5, -78.5),
        provider("y", "Y", "Grúa", "Quito", "Pichincha", -0.5, -78.5),
        provider("z", "Z", "Grúa", "Quito", "Pichincha", -0.1, -78.5),
    ];
    let here = Coordinate { lat: -0.1, lng: -78.5 };
    let results = rank_providers(&catalog, Some(here), &FilterCriteria::default(), SearchScope::Extended);
    assert_eq!(ids(&results), vec!["z", "x", "y"]);
}

#[test]
fn search_is_case_insensitive_substring_on_name() {
    let criteria = FilterCriteria {
        search_text: "GRÚAS".to_string(),
        ..FilterCriteria::default()
    };
    let results = rank_providers(&catalog(), None, &criteria, SearchScope::NameOnly);
    assert_eq!(ids(&results), vec!["a"]);
}

#[test]
fn name_only_scope_ignores_city() {
    let criteria = FilterCriteria {
        search_text: "quito".to_string(),
        ..FilterCriteria::default()
    };
    let results = rank_providers(&catalog(), None, &criteria, SearchScope::NameOnly);
    assert!(results.is_empty());
}

#[test]
fn extended_scope_matches_category_and_city() {
    let by_city = FilterCriteria {
        search_text: "quito".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(
        ids(&rank_providers(&catalog(), None, &by_city, SearchScope::Extended)),
        vec!["a", "d"]
    );

    let by_category = FilterCriteria {
        search_text: "médica".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(
        ids(&rank_providers(&catalog(), None, &by_category, SearchScope::Extended)),
        vec!["b"]
    );
}

#[test]
fn province_is_equality_not_substring() {
    let criteria = FilterCriteria {
        province: "Pichin".to_string(),
        ..FilterCriteria::default()
    };
    assert!(rank_providers(&catalog(), None, &criteria, SearchScope::Extended).is_empty());

    let criteria = FilterCriteria {
        province: "pichincha".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(
        ids(&rank_providers(&catalog(), None, &criteria, SearchScope::Extended)),
        vec!["a", "d"]
    );
}

#[test]
fn city_is_substring() {
    let criteria = FilterCriteria {
        city: "guaya".to_string(),
        ..FilterCriteria::default()
    };
    assert_eq!(
        ids(&rank_providers(&catalog(), None, &criteria, SearchScope::Extended)),
        vec!["b"]
    );
}

#[test]
fn predicates_are_anded() {
    let criteria = FilterCriteria {
        search_text: "quito".to_string(),
        category: "Dental".to_string(),
        province: "Pichincha".to_string(),
        city: "qui".to_string(),
    };
    assert_eq!(
        ids(&rank_providers(&catalog(), Some(QUITO), &criteria, SearchScope::Extended)),
        vec!["d"]
    );
}

#[test]
fn no_match_is_empty_not_error() {
    let criteria = FilterCriteria {
        category: "Seguro".to_string(),
        ..FilterCriteria::default()
    };
    assert!(rank_providers(&catalog(), Some(QUITO), &criteria, SearchScope::Extended).is_empty());
}

#[test]
fn whitespace_only_fields_are_unset() {
    let criteria = FilterCriteria {
        search_text: "   ".to_string(),
        ..FilterCriteria::default()
    };
    assert!(criteria.is_empty());
    assert_eq!(rank_providers(&catalog(), None, &criteria, SearchScope::Extended).len(), 4);
}

#[test]
fn pipeline_is_deterministic() {
    let criteria = FilterCriteria {
        search_text: "a".to_string(),
        ..FilterCriteria::default()
    };
    let first = rank_providers(&catalog(), Some(QUITO), &criteria, SearchScope::Extended);
    let second = rank_providers(&catalog(), Some(QUITO), &criteria, SearchScope::Extended);
    assert_eq!(first, second);
}

#[test]
fn clear_resets_every_field() {
    let mut criteria = FilterCriteria {
        search_text: "x".to_string(),
        category: "Grúa".to_string(),
        province: "Azuay".to_string(),
        city: "Cuenca".to_string(),
    };
    criteria.clear();
    assert_eq!(criteria, FilterCriteria::default());
}

#[test]
fn search_scope_parses_config_values() {
    assert_eq!("name".parse::<SearchScope>().unwrap(), SearchScope::NameOnly);
    assert_eq!("extended".parse::<SearchScope>().unwrap(), SearchScope::Extended);
    assert!("all".parse::<SearchScope>().is_err());
}
