//! Repository for the `leases` table.

use std::collections::HashMap;

use rentwise_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::lease::{CreateLease, Lease, LeaseWithParties, LeaseWithPayments};
use crate::repositories::{PaymentRepo, PropertyRepo, TenantRepo};

const COLUMNS: &str = "id, start_date, end_date, rent, deposit, property_id, tenant_cognito_id";

/// Provides lease creation and the lease views used across the API.
pub struct LeaseRepo;

impl LeaseRepo {
    /// Insert a lease. Runs on a pool or inside a caller's transaction.
    pub async fn create<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateLease,
    ) -> Result<Lease, sqlx::Error> {
        let query = format!(
            "INSERT INTO leases (start_date, end_date, rent, deposit, property_id, tenant_cognito_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.rent)
            .bind(input.deposit)
            .bind(input.property_id)
            .bind(&input.tenant_cognito_id)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Lease>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leases WHERE id = $1");
        sqlx::query_as::<_, Lease>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Lease>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leases ORDER BY start_date DESC, id DESC");
        sqlx::query_as::<_, Lease>(&query).fetch_all(pool).await
    }

    /// List all leases with their tenant and property.
    ///
    /// Tenants and properties are loaded in two batched queries rather than
    /// one lookup per lease.
    pub async fn list_with_parties(pool: &PgPool) -> Result<Vec<LeaseWithParties>, sqlx::Error> {
        let leases = Self::list(pool).await?;

        let mut tenant_ids: Vec<String> =
            leases.iter().map(|l| l.tenant_cognito_id.clone()).collect();
        tenant_ids.sort();
        tenant_ids.dedup();
        let mut property_ids: Vec<DbId> = leases.iter().map(|l| l.property_id).collect();
        property_ids.sort_unstable();
        property_ids.dedup();

        let tenants: HashMap<_, _> = TenantRepo::find_many_by_cognito_ids(pool, &tenant_ids)
            .await?
            .into_iter()
            .map(|t| (t.cognito_id.clone(), t))
            .collect();
        let properties: HashMap<_, _> = PropertyRepo::find_many(pool, &property_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        // Foreign keys guarantee both sides exist.
        Ok(leases
            .into_iter()
            .filter_map(|lease| {
                let tenant = tenants.get(&lease.tenant_cognito_id)?.clone();
                let property = properties.get(&lease.property_id)?.clone();
                Some(LeaseWithParties {
                    lease,
                    tenant,
                    property,
                })
            })
            .collect())
    }

    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Lease>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leases WHERE property_id = $1 ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_by_tenant(
        pool: &PgPool,
        tenant_cognito_id: &str,
    ) -> Result<Vec<Lease>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM leases WHERE tenant_cognito_id = $1 \
             ORDER BY start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(tenant_cognito_id)
            .fetch_all(pool)
            .await
    }

    /// The most recent lease of each tenant on each of the given properties.
    pub async fn list_latest_for_properties(
        pool: &PgPool,
        property_ids: &[DbId],
    ) -> Result<Vec<Lease>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT ON (tenant_cognito_id, property_id) {COLUMNS} FROM leases
             WHERE property_id = ANY($1)
             ORDER BY tenant_cognito_id, property_id, start_date DESC, id DESC"
        );
        sqlx::query_as::<_, Lease>(&query)
            .bind(property_ids)
            .fetch_all(pool)
            .await
    }

    /// The tenant's leases, each with its property and payments.
    pub async fn list_with_payments_for_tenant(
        pool: &PgPool,
        tenant_cognito_id: &str,
    ) -> Result<Vec<LeaseWithPayments>, sqlx::Error> {
        let leases = Self::list_by_tenant(pool, tenant_cognito_id).await?;
        let mut result = Vec::with_capacity(leases.len());

        for lease in leases {
            let property = PropertyRepo::find_by_id(pool, lease.property_id)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            let payments = PaymentRepo::list_by_lease(pool, lease.id).await?;
            result.push(LeaseWithPayments {
                lease,
                property,
                payments,
            });
        }

        Ok(result)
    }
}
