//! Coordinates and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Builds a coordinate, rejecting values outside the valid range.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::LatitudeOutOfRange`] or
    /// [`CoreError::LongitudeOutOfRange`] for out-of-range or non-finite input.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoreError::LatitudeOutOfRange(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoreError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// Approximate geographic centroid of mainland Ecuador.
    #[must_use]
    pub const fn ecuador_centroid() -> Self {
        Self {
            lat: -1.8312,
            lng: -78.1834,
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = String;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LNG but got '{s}'"))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
        let lng: f64 = lng
            .trim()
            .parse()
            .map_err(|e| format!("invalid longitude '{lng}': {e}"))?;
        Self::new(lat, lng).map_err(|e| e.to_string())
    }
}

/// Haversine distance between two coordinates, in kilometres.
#[must_use]
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `h` a hair above 1 for antipodal points.
    let c = 2.0 * h.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUITO: Coordinate = Coordinate {
        lat: -0.1807,
        lng: -78.4678,
    };
    const GUAYAQUIL: Coordinate = Coordinate {
        lat: -2.1894,
        lng: -79.8891,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance_km(QUITO, QUITO), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let samples = [
            QUITO,
            GUAYAQUIL,
            Coordinate { lat: 89.9, lng: 179.9 },
            Coordinate { lat: -45.0, lng: -120.5 },
            Coordinate { lat: 0.0, lng: 0.0 },
        ];
        for a in samples {
            for b in samples {
                let ab = distance_km(a, b);
                let ba = distance_km(b, a);
                assert!((ab - ba).abs() < 1e-9, "{a} -> {b}: {ab} vs {ba}");
            }
        }
    }

    #[test]
    fn quito_to_guayaquil_is_about_270_km() {
        let d = distance_km(QUITO, GUAYAQUIL);
        assert!((d - 270.0).abs() < 10.0, "got {d}");
    }

    #[test]
    fn antipodal_points_are_half_circumference() {
        let a = Coordinate { lat: 0.0, lng: 0.0 };
        let b = Coordinate { lat: 0.0, lng: 180.0 };
        let expected = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((distance_km(a, b) - expected).abs() < 1e-6);
    }

    #[test]
    fn new_rejects_out_of_range_latitude() {
        assert_eq!(
            Coordinate::new(91.0, 0.0),
            Err(CoreError::LatitudeOutOfRange(91.0))
        );
    }

    #[test]
    fn new_rejects_out_of_range_longitude() {
        assert_eq!(
            Coordinate::new(0.0, -180.5),
            Err(CoreError::LongitudeOutOfRange(-180.5))
        );
    }

    #[test]
    fn new_rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn parses_lat_lng_pair() {
        let c: Coordinate = "-1.0, -79.0".parse().unwrap();
        assert_eq!(c, Coordinate { lat: -1.0, lng: -79.0 });
    }

    #[test]
    fn parse_rejects_missing_comma() {
        assert!("-1.0".parse::<Coordinate>().is_err());
    }
}
