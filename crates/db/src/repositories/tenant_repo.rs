//! Repository for the `tenants` table and tenant favorites.

use rentwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::tenant::{CreateTenant, Tenant, TenantDetail, UpdateTenant};
use crate::repositories::{ApplicationRepo, LeaseRepo, PropertyRepo};

const COLUMNS: &str = "id, cognito_id, name, email, phone_number, created_at, updated_at";

/// Provides CRUD operations for tenants, keyed by Cognito ID.
pub struct TenantRepo;

impl TenantRepo {
    /// Insert a new tenant. A duplicate Cognito ID violates `uq_tenants_cognito_id`.
    pub async fn create(pool: &PgPool, input: &CreateTenant) -> Result<Tenant, sqlx::Error> {
        let query = format!(
            "INSERT INTO tenants (cognito_id, name, email, phone_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(&input.cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_cognito_id(
        pool: &PgPool,
        cognito_id: &str,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE cognito_id = $1");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(cognito_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several tenants by Cognito ID. Unknown ids are skipped.
    pub async fn find_many_by_cognito_ids(
        pool: &PgPool,
        cognito_ids: &[String],
    ) -> Result<Vec<Tenant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tenants WHERE cognito_id = ANY($1)");
        sqlx::query_as::<_, Tenant>(&query)
            .bind(cognito_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a tenant. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no tenant has the given Cognito ID.
    pub async fn update(
        pool: &PgPool,
        cognito_id: &str,
        input: &UpdateTenant,
    ) -> Result<Option<Tenant>, sqlx::Error> {
        let query = format!(
            "UPDATE tenants SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone_number = COALESCE($4, phone_number)
             WHERE cognito_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tenant>(&query)
            .bind(cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_optional(pool)
            .await
    }

    /// Find a tenant with residences, favorites, applications and leases.
    pub async fn find_detail(
        pool: &PgPool,
        cognito_id: &str,
    ) -> Result<Option<TenantDetail>, sqlx::Error> {
        let Some(tenant) = Self::find_by_cognito_id(pool, cognito_id).await? else {
            return Ok(None);
        };

        let properties = PropertyRepo::list_resided_by(pool, tenant.id).await?;
        let favorites = PropertyRepo::list_favorited_by(pool, tenant.id).await?;
        let applications = ApplicationRepo::list_with_property_for_tenant(pool, cognito_id).await?;
        let leases = LeaseRepo::list_with_payments_for_tenant(pool, cognito_id).await?;

        Ok(Some(TenantDetail {
            tenant,
            properties,
            favorites,
            applications,
            leases,
        }))
    }

    /// Mark a property as a tenant favorite.
    ///
    /// Returns `false` if it was already a favorite.
    pub async fn add_favorite(
        pool: &PgPool,
        tenant_id: DbId,
        property_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO property_favorites (tenant_id, property_id)
             VALUES ($1, $2)
             ON CONFLICT DO NOTHING",
        )
        .bind(tenant_id)
        .bind(property_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove a favorite. Returns `true` if a row was removed.
    pub async fn remove_favorite(
        pool: &PgPool,
        tenant_id: DbId,
        property_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM property_favorites WHERE tenant_id = $1 AND property_id = $2")
                .bind(tenant_id)
                .bind(property_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
