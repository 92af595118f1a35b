//! Read-only listing commands.

use asistencia_core::{
    rank_providers, AnnotatedProvider, Catalog, Facets, FilterCriteria, LocationState, SearchScope,
};

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

/// Prints `providers` as a numbered table, nearest first when ranked.
pub(crate) fn print_table(providers: &[AnnotatedProvider]) {
    if providers.is_empty() {
        println!("no providers match the current filters");
        return;
    }

    println!(
        "{:<4}{:<32}{:<14}{:<18}{:<16}{:<14}DISTANCE",
        "#", "NAME", "CATEGORY", "CITY", "PROVINCE", "PHONE"
    );
    for (i, entry) in providers.iter().enumerate() {
        let p = &entry.provider;
        println!(
            "{:<4}{:<32}{:<14}{:<18}{:<16}{:<14}{}",
            i + 1,
            truncate(&p.name, 30),
            truncate(&p.category, 12),
            truncate(&p.city, 16),
            truncate(&p.province, 14),
            p.contact_phone,
            entry.distance_label().unwrap_or_else(|| "-".to_string())
        );
    }
}

/// Ranks the catalog and prints the result.
///
/// # Errors
///
/// Returns an error if JSON output cannot be serialized.
pub(crate) fn run_list(
    catalog: &Catalog,
    location: &LocationState,
    criteria: &FilterCriteria,
    scope: SearchScope,
    json: bool,
) -> anyhow::Result<()> {
    let ranked = rank_providers(catalog.providers(), location.current(), criteria, scope);
    tracing::info!(
        source = %catalog.source(),
        catalog = catalog.len(),
        matched = ranked.len(),
        location = %location.source(),
        "providers ranked"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print_table(&ranked);
    }
    Ok(())
}

pub(crate) fn run_facets(catalog: &Catalog) {
    let facets = Facets::from_catalog(catalog.providers());
    println!("Categories: {}", facets.categories.join(", "));
    println!("Provinces:  {}", facets.provinces.join(", "));
    if facets.cities.is_empty() {
        println!("Cities:     (none in catalog)");
    } else {
        println!("Cities:     {}", facets.cities.join(", "));
    }
}
