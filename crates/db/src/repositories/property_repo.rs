//! Repository for the `properties` table and its tenant link tables.

use rentwise_core::geo::{km_to_degrees, SEARCH_RADIUS_KM};
use rentwise_core::search::PropertyFilter;
use rentwise_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::models::location::Location;
use crate::models::property::{
    CreateProperty, Property, PropertyDetail, PropertyListing, PropertyListingRow, UpdateProperty,
};
use crate::repositories::{ApplicationRepo, LeaseRepo, LocationRepo, ManagerRepo};

/// Column list for `properties`, unqualified.
const COLUMNS: &str = "id, name, description, price_per_month, security_deposit, \
    application_fee, photo_urls, amenities, highlights, is_pets_allowed, \
    is_parking_included, beds, baths, square_feet, property_type, posted_date, \
    average_rating, number_of_reviews, location_id, manager_cognito_id";

/// Property-with-location select. Location columns are prefixed `loc_` so
/// they do not collide with property columns in [`PropertyListingRow`].
const LISTING_SELECT: &str = "SELECT p.id, p.name, p.description, p.price_per_month, \
    p.security_deposit, p.application_fee, p.photo_urls, p.amenities, p.highlights, \
    p.is_pets_allowed, p.is_parking_included, p.beds, p.baths, p.square_feet, \
    p.property_type, p.posted_date, p.average_rating, p.number_of_reviews, \
    p.location_id, p.manager_cognito_id, \
    l.address AS loc_address, l.city AS loc_city, l.state AS loc_state, \
    l.country AS loc_country, l.postal_code AS loc_postal_code, \
    ST_X(l.coordinates::geometry) AS loc_longitude, \
    ST_Y(l.coordinates::geometry) AS loc_latitude \
    FROM properties p \
    JOIN locations l ON l.id = p.location_id";

const LISTING_ORDER: &str = " ORDER BY p.posted_date DESC, p.id DESC";

/// Provides CRUD and search operations for properties.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Search properties with an optional filter, newest first.
    ///
    /// Each populated filter field adds one `AND` predicate; an empty filter
    /// returns every property.
    pub async fn search(
        pool: &PgPool,
        filter: &PropertyFilter,
    ) -> Result<Vec<PropertyListing>, sqlx::Error> {
        let mut qb = QueryBuilder::<Postgres>::new(LISTING_SELECT);
        qb.push(" WHERE TRUE");

        if !filter.favorite_ids.is_empty() {
            qb.push(" AND p.id = ANY(")
                .push_bind(filter.favorite_ids.clone())
                .push(")");
        }
        if let Some(min) = filter.price_min {
            qb.push(" AND p.price_per_month >= ").push_bind(min);
        }
        if let Some(max) = filter.price_max {
            qb.push(" AND p.price_per_month <= ").push_bind(max);
        }
        if let Some(beds) = filter.beds_min {
            qb.push(" AND p.beds >= ").push_bind(beds);
        }
        if let Some(baths) = filter.baths_min {
            qb.push(" AND p.baths >= ").push_bind(baths);
        }
        if let Some(min) = filter.square_feet_min {
            qb.push(" AND p.square_feet >= ").push_bind(min);
        }
        if let Some(max) = filter.square_feet_max {
            qb.push(" AND p.square_feet <= ").push_bind(max);
        }
        if let Some(kind) = &filter.property_type {
            qb.push(" AND p.property_type = ")
                .push_bind(kind.clone())
                .push("::property_type");
        }
        if !filter.amenities.is_empty() {
            qb.push(" AND p.amenities @> ")
                .push_bind(filter.amenities.clone())
                .push("::amenity[]");
        }
        if let Some(date) = filter.available_from {
            qb.push(
                " AND EXISTS (SELECT 1 FROM leases le \
                 WHERE le.property_id = p.id AND le.start_date <= ",
            )
            .push_bind(date)
            .push(")");
        }
        if let Some(point) = filter.near {
            qb.push(" AND ST_DWithin(l.coordinates::geometry, ST_SetSRID(ST_MakePoint(")
                .push_bind(point.longitude)
                .push(", ")
                .push_bind(point.latitude)
                .push("), 4326), ")
                .push_bind(km_to_degrees(SEARCH_RADIUS_KM))
                .push(")");
        }

        qb.push(LISTING_ORDER);

        let rows = qb
            .build_query_as::<PropertyListingRow>()
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several properties by id. Missing ids are skipped.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = ANY($1)");
        sqlx::query_as::<_, Property>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Find a property together with its location.
    pub async fn find_listing_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PropertyListing>, sqlx::Error> {
        let query = format!("{LISTING_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PropertyListingRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(PropertyListing::from))
    }

    /// Fetch several properties with their locations. Missing ids are skipped.
    pub async fn find_listings(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<PropertyListing>, sqlx::Error> {
        let query = format!("{LISTING_SELECT} WHERE p.id = ANY($1)");
        let rows = sqlx::query_as::<_, PropertyListingRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    /// Find a property with its location, manager, leases and applications.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<PropertyDetail>, sqlx::Error> {
        let Some(listing) = Self::find_listing_by_id(pool, id).await? else {
            return Ok(None);
        };

        // The foreign key guarantees the manager row exists.
        let manager = ManagerRepo::find_by_cognito_id(pool, &listing.property.manager_cognito_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let leases = LeaseRepo::list_by_property(pool, id).await?;
        let applications = ApplicationRepo::list_by_property(pool, id).await?;

        Ok(Some(PropertyDetail {
            listing,
            manager,
            leases,
            applications,
        }))
    }

    /// List the properties managed by the given manager, newest first.
    pub async fn list_by_manager(
        pool: &PgPool,
        manager_cognito_id: &str,
    ) -> Result<Vec<PropertyListing>, sqlx::Error> {
        let query = format!("{LISTING_SELECT} WHERE p.manager_cognito_id = $1{LISTING_ORDER}");
        let rows = sqlx::query_as::<_, PropertyListingRow>(&query)
            .bind(manager_cognito_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    /// List the properties a tenant currently resides in.
    pub async fn list_resided_by(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<PropertyListing>, sqlx::Error> {
        let query = format!(
            "{LISTING_SELECT} \
             JOIN property_residents r ON r.property_id = p.id \
             WHERE r.tenant_id = $1{LISTING_ORDER}"
        );
        let rows = sqlx::query_as::<_, PropertyListingRow>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    /// List the properties a tenant has marked as favorite.
    pub async fn list_favorited_by(
        pool: &PgPool,
        tenant_id: DbId,
    ) -> Result<Vec<PropertyListing>, sqlx::Error> {
        let query = format!(
            "{LISTING_SELECT} \
             JOIN property_favorites f ON f.property_id = p.id \
             WHERE f.tenant_id = $1{LISTING_ORDER}"
        );
        let rows = sqlx::query_as::<_, PropertyListingRow>(&query)
            .bind(tenant_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(PropertyListing::from).collect())
    }

    /// Insert a location and a property referencing it in one transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProperty,
    ) -> Result<PropertyListing, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let location: Location = LocationRepo::create(&mut *tx, &input.location).await?;

        let query = format!(
            "INSERT INTO properties
                (name, description, price_per_month, security_deposit, application_fee,
                 photo_urls, amenities, highlights, is_pets_allowed, is_parking_included,
                 beds, baths, square_feet, property_type, location_id, manager_cognito_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        let property = sqlx::query_as::<_, Property>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price_per_month)
            .bind(input.security_deposit)
            .bind(input.application_fee)
            .bind(&input.photo_urls)
            .bind(&input.amenities)
            .bind(&input.highlights)
            .bind(input.is_pets_allowed)
            .bind(input.is_parking_included)
            .bind(input.beds)
            .bind(input.baths)
            .bind(input.square_feet)
            .bind(input.property_type)
            .bind(location.id)
            .bind(&input.manager_cognito_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(PropertyListing { property, location })
    }

    /// Update a property. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                price_per_month = COALESCE($4, price_per_month),
                security_deposit = COALESCE($5, security_deposit),
                application_fee = COALESCE($6, application_fee),
                photo_urls = COALESCE($7, photo_urls),
                amenities = COALESCE($8, amenities),
                highlights = COALESCE($9, highlights),
                is_pets_allowed = COALESCE($10, is_pets_allowed),
                is_parking_included = COALESCE($11, is_parking_included),
                beds = COALESCE($12, beds),
                baths = COALESCE($13, baths),
                square_feet = COALESCE($14, square_feet),
                property_type = COALESCE($15, property_type),
                location_id = COALESCE($16, location_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price_per_month)
            .bind(input.security_deposit)
            .bind(input.application_fee)
            .bind(&input.photo_urls)
            .bind(&input.amenities)
            .bind(&input.highlights)
            .bind(input.is_pets_allowed)
            .bind(input.is_parking_included)
            .bind(input.beds)
            .bind(input.baths)
            .bind(input.square_feet)
            .bind(input.property_type)
            .bind(input.location_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a property. Returns the deleted row, or `None` if it did not exist.
    ///
    /// Fails with a foreign-key violation while leases or applications still
    /// reference the property. Favorites and residents cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("DELETE FROM properties WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Link a tenant to a property as a resident. Idempotent.
    ///
    /// Returns `false` if the link already existed or the tenant is unknown.
    pub async fn add_resident<'e, E: PgExecutor<'e>>(
        executor: E,
        property_id: DbId,
        tenant_cognito_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO property_residents (tenant_id, property_id)
             SELECT t.id, $1 FROM tenants t WHERE t.cognito_id = $2
             ON CONFLICT DO NOTHING",
        )
        .bind(property_id)
        .bind(tenant_cognito_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
