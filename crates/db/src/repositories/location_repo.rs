//! Repository for the `locations` table.

use rentwise_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::location::{CreateLocation, Location, LocationRow};

/// Column list with the geography point split into longitude/latitude.
const COLUMNS: &str = "id, address, city, state, country, postal_code, \
    ST_X(coordinates::geometry) AS longitude, ST_Y(coordinates::geometry) AS latitude";

/// Provides insert and lookup for locations.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert a location, storing its coordinates as an SRID 4326 point.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateLocation,
    ) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO locations (address, city, state, country, postal_code, coordinates)
             VALUES ($1, $2, $3, $4, $5, ST_SetSRID(ST_MakePoint($6, $7), 4326))
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, LocationRow>(&query)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.country)
            .bind(&input.postal_code)
            .bind(input.coordinates.longitude)
            .bind(input.coordinates.latitude)
            .fetch_one(executor)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM locations WHERE id = $1");
        let row = sqlx::query_as::<_, LocationRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Location::from))
    }
}
