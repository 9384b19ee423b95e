//! Geographic coordinates as stored in `locations.coordinates`.

use serde::{Deserialize, Serialize};

/// A WGS84 point. Longitude first, matching PostGIS `ST_MakePoint(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    /// Fallback used when an address cannot be geocoded.
    pub const ORIGIN: Coordinates = Coordinates {
        longitude: 0.0,
        latitude: 0.0,
    };

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Both axes are finite and inside the WGS84 range.
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Search radius for "near me" property queries.
pub const SEARCH_RADIUS_KM: f64 = 1000.0;

/// Approximate kilometres per degree of arc.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Convert a radius in kilometres to degrees for `ST_DWithin` on geometry.
pub fn km_to_degrees(km: f64) -> f64 {
    km / KM_PER_DEGREE
}
