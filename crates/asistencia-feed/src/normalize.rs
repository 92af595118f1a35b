//! Maps raw feed rows onto [`ProviderRecord`]s.

use asistencia_core::{Coordinate, ProviderId, ProviderRecord};

use crate::csv::{parse_document, FeedRow};

pub const DEFAULT_NAME: &str = "Sin nombre";
pub const DEFAULT_CATEGORY: &str = "General";

#[allow(clippy::float_cmp)]
fn parse_coordinate(row: &FeedRow) -> Option<Coordinate> {
    let lat: f64 = row.get("lat")?.parse().ok()?;
    let lng: f64 = row.get("lng")?.parse().ok()?;
    // A zero is how the sheet encodes a location nobody filled in.
    if lat == 0.0 || lng == 0.0 {
        return None;
    }
    Coordinate::new(lat, lng).ok()
}

/// Normalizes one feed row, or `None` when it has no usable location.
///
/// Every accepted row gets a freshly generated id.
#[must_use]
pub fn normalize_row(row: &FeedRow) -> Option<ProviderRecord> {
    let location = parse_coordinate(row)?;
    let text = |column: &str| row.get(column).unwrap_or_default().to_string();

    Some(ProviderRecord {
        id: ProviderId::generate(),
        name: row.get("nombre_proveedor").unwrap_or(DEFAULT_NAME).to_string(),
        category: row.get("categoria").unwrap_or(DEFAULT_CATEGORY).to_string(),
        city: text("ciudad"),
        province: text("provincia"),
        location,
        contact_phone: text("numero_celular"),
        address: row.get("direccion").map(str::to_string),
        contact_name: row.get("nombre_contacto").map(str::to_string),
    })
}

/// Parses a CSV document and keeps every row with a usable location.
#[must_use]
pub fn providers_from_csv(text: &str) -> Vec<ProviderRecord> {
    let rows = parse_document(text);
    let total = rows.len();
    let providers: Vec<ProviderRecord> = rows.iter().filter_map(normalize_row).collect();

    let dropped = total - providers.len();
    if dropped > 0 {
        tracing::debug!(total, dropped, "dropped feed rows without a usable location");
    }
    providers
}
