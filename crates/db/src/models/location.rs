//! Location model. Coordinates are a PostGIS `geography(Point, 4326)` column,
//! selected as separate longitude/latitude values.

use rentwise_core::geo::Coordinates;
use rentwise_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from `locations`, with `ST_X` / `ST_Y` of the point.
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub id: DbId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// A location as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: DbId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub coordinates: Coordinates,
}

impl From<LocationRow> for Location {
    fn from(row: LocationRow) -> Self {
        Self {
            id: row.id,
            address: row.address,
            city: row.city,
            state: row.state,
            country: row.country,
            postal_code: row.postal_code,
            coordinates: Coordinates::new(row.longitude, row.latitude),
        }
    }
}

/// DTO for inserting a location once its address has been geocoded.
#[derive(Debug, Clone)]
pub struct CreateLocation {
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub coordinates: Coordinates,
}
