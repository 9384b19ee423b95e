//! Repository for the `managers` table.

use sqlx::PgPool;

use crate::models::manager::{CreateManager, ManagedProperty, Manager, ManagerDetail, UpdateManager};
use crate::repositories::{ApplicationRepo, LeaseRepo, PropertyRepo};

const COLUMNS: &str = "id, cognito_id, name, email, phone_number, created_at, updated_at";

/// Provides CRUD operations for managers, keyed by Cognito ID.
pub struct ManagerRepo;

impl ManagerRepo {
    /// Insert a new manager. A duplicate Cognito ID violates `uq_managers_cognito_id`.
    pub async fn create(pool: &PgPool, input: &CreateManager) -> Result<Manager, sqlx::Error> {
        let query = format!(
            "INSERT INTO managers (cognito_id, name, email, phone_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manager>(&query)
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
    ) -> Result<Option<Manager>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM managers WHERE cognito_id = $1");
        sqlx::query_as::<_, Manager>(&query)
            .bind(cognito_id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch several managers by Cognito ID. Unknown ids are skipped.
    pub async fn find_many_by_cognito_ids(
        pool: &PgPool,
        cognito_ids: &[String],
    ) -> Result<Vec<Manager>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM managers WHERE cognito_id = ANY($1)");
        sqlx::query_as::<_, Manager>(&query)
            .bind(cognito_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a manager. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no manager has the given Cognito ID.
    pub async fn update(
        pool: &PgPool,
        cognito_id: &str,
        input: &UpdateManager,
    ) -> Result<Option<Manager>, sqlx::Error> {
        let query = format!(
            "UPDATE managers SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone_number = COALESCE($4, phone_number)
             WHERE cognito_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Manager>(&query)
            .bind(cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .fetch_optional(pool)
            .await
    }

    /// Find a manager with their properties, each with leases and applications.
    pub async fn find_detail(
        pool: &PgPool,
        cognito_id: &str,
    ) -> Result<Option<ManagerDetail>, sqlx::Error> {
        let Some(manager) = Self::find_by_cognito_id(pool, cognito_id).await? else {
            return Ok(None);
        };

        let listings = PropertyRepo::list_by_manager(pool, cognito_id).await?;
        let mut managed_properties = Vec::with_capacity(listings.len());
        for listing in listings {
            let leases = LeaseRepo::list_by_property(pool, listing.property.id).await?;
            let applications = ApplicationRepo::list_by_property(pool, listing.property.id).await?;
            managed_properties.push(ManagedProperty {
                listing,
                leases,
                applications,
            });
        }

        Ok(Some(ManagerDetail {
            manager,
            managed_properties,
        }))
    }
}
