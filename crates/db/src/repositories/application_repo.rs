//! Repository for the `applications` table.

use std::collections::HashMap;

use rentwise_core::lease_terms::next_payment_date;
use rentwise_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::application::{
    Application, ApplicationDetail, ApplicationListing, ApplicationScope,
    ApplicationWithProperty, CreateApplication, PropertyWithAddress,
};
use crate::models::enums::ApplicationStatus;
use crate::models::lease::{CreateLease, LeaseWithNextPayment};
use crate::repositories::{LeaseRepo, ManagerRepo, PropertyRepo, TenantRepo};

const COLUMNS: &str = "id, application_date, status, property_id, tenant_cognito_id, \
    name, email, phone_number, message, lease_id";

/// Provides application lifecycle operations.
pub struct ApplicationRepo;

impl ApplicationRepo {
    pub async fn find_by_id<'e, E: PgExecutor<'e>>(
        executor: E,
        id: DbId,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List applications in the given scope, newest application date first.
    pub async fn list(
        pool: &PgPool,
        scope: &ApplicationScope,
    ) -> Result<Vec<Application>, sqlx::Error> {
        const ORDER: &str = "ORDER BY application_date DESC, id DESC";
        match scope {
            ApplicationScope::All => {
                let query = format!("SELECT {COLUMNS} FROM applications {ORDER}");
                sqlx::query_as::<_, Application>(&query).fetch_all(pool).await
            }
            ApplicationScope::Tenant(cognito_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM applications WHERE tenant_cognito_id = $1 {ORDER}"
                );
                sqlx::query_as::<_, Application>(&query)
                    .bind(cognito_id)
                    .fetch_all(pool)
                    .await
            }
            ApplicationScope::Manager(cognito_id) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM applications
                     WHERE property_id IN (SELECT id FROM properties WHERE manager_cognito_id = $1)
                     {ORDER}"
                );
                sqlx::query_as::<_, Application>(&query)
                    .bind(cognito_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    pub async fn list_by_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE property_id = $1 \
             ORDER BY application_date DESC, id DESC"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(property_id)
            .fetch_all(pool)
            .await
    }

    /// A tenant's applications, each with the property applied for.
    pub async fn list_with_property_for_tenant(
        pool: &PgPool,
        tenant_cognito_id: &str,
    ) -> Result<Vec<ApplicationWithProperty>, sqlx::Error> {
        let scope = ApplicationScope::Tenant(tenant_cognito_id.to_string());
        let applications = Self::list(pool, &scope).await?;
        let mut result = Vec::with_capacity(applications.len());

        for application in applications {
            let property = PropertyRepo::find_by_id(pool, application.property_id)
                .await?
                .ok_or(sqlx::Error::RowNotFound)?;
            result.push(ApplicationWithProperty {
                application,
                property,
            });
        }

        Ok(result)
    }

    /// Application listing for the dashboards.
    ///
    /// Each entry carries the property (with its street address), the
    /// property's manager, the applicant and the applicant's latest lease on
    /// that property annotated with the next rent due date relative to `now`.
    /// Related rows are loaded in four batched queries.
    pub async fn list_listings(
        pool: &PgPool,
        scope: &ApplicationScope,
        now: Timestamp,
    ) -> Result<Vec<ApplicationListing>, sqlx::Error> {
        let applications = Self::list(pool, scope).await?;

        let mut property_ids: Vec<DbId> = applications.iter().map(|a| a.property_id).collect();
        property_ids.sort_unstable();
        property_ids.dedup();
        let mut tenant_ids: Vec<String> = applications
            .iter()
            .map(|a| a.tenant_cognito_id.clone())
            .collect();
        tenant_ids.sort();
        tenant_ids.dedup();

        let listings: HashMap<_, _> = PropertyRepo::find_listings(pool, &property_ids)
            .await?
            .into_iter()
            .map(|l| (l.property.id, l))
            .collect();

        let mut manager_ids: Vec<String> = listings
            .values()
            .map(|l| l.property.manager_cognito_id.clone())
            .collect();
        manager_ids.sort();
        manager_ids.dedup();

        let managers: HashMap<_, _> = ManagerRepo::find_many_by_cognito_ids(pool, &manager_ids)
            .await?
            .into_iter()
            .map(|m| (m.cognito_id.clone(), m))
            .collect();
        let tenants: HashMap<_, _> = TenantRepo::find_many_by_cognito_ids(pool, &tenant_ids)
            .await?
            .into_iter()
            .map(|t| (t.cognito_id.clone(), t))
            .collect();
        let leases: HashMap<_, _> = LeaseRepo::list_latest_for_properties(pool, &property_ids)
            .await?
            .into_iter()
            .map(|l| ((l.tenant_cognito_id.clone(), l.property_id), l))
            .collect();

        // Foreign keys guarantee the property, manager and tenant exist.
        Ok(applications
            .into_iter()
            .filter_map(|application| {
                let listing = listings.get(&application.property_id)?.clone();
                let manager = managers.get(&listing.property.manager_cognito_id)?.clone();
                let tenant = tenants.get(&application.tenant_cognito_id)?.clone();
                let lease = leases
                    .get(&(application.tenant_cognito_id.clone(), application.property_id))
                    .cloned()
                    .map(|lease| LeaseWithNextPayment {
                        next_payment_date: next_payment_date(lease.start_date, now),
                        lease,
                    });
                Some(ApplicationListing {
                    application,
                    property: PropertyWithAddress {
                        property: listing.property,
                        address: listing.location.address,
                    },
                    manager,
                    tenant,
                    lease,
                })
            })
            .collect())
    }

    /// Find an application with its property, tenant and lease.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ApplicationDetail>, sqlx::Error> {
        let Some(application) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let property = PropertyRepo::find_by_id(pool, application.property_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let tenant = TenantRepo::find_by_cognito_id(pool, &application.tenant_cognito_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        let lease = match application.lease_id {
            Some(lease_id) => LeaseRepo::find_by_id(pool, lease_id).await?,
            None => None,
        };

        Ok(Some(ApplicationDetail {
            application,
            property,
            tenant,
            lease,
        }))
    }

    /// Create a lease and an application pointing at it, atomically.
    ///
    /// If either insert fails nothing is written.
    pub async fn create_with_lease(
        pool: &PgPool,
        input: &CreateApplication,
        lease: &CreateLease,
    ) -> Result<ApplicationDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lease = LeaseRepo::create(&mut *tx, lease).await?;

        let query = format!(
            "INSERT INTO applications
                (application_date, status, property_id, tenant_cognito_id,
                 name, email, phone_number, message, lease_id)
             VALUES ($1, 'Pending', $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let application = sqlx::query_as::<_, Application>(&query)
            .bind(input.application_date)
            .bind(input.property_id)
            .bind(&input.tenant_cognito_id)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone_number)
            .bind(&input.message)
            .bind(lease.id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Self::find_detail(pool, application.id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Set an application's status without touching leases or residents.
    ///
    /// Returns `None` if the application does not exist.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: ApplicationStatus,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("UPDATE applications SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Approve an application in one transaction.
    ///
    /// Inserts `new_lease`, links it to the application and adds the
    /// applicant to the property's residents. The lease opened at submission
    /// stays on record. Returns `None` if the application does not exist.
    pub async fn approve(
        pool: &PgPool,
        id: DbId,
        new_lease: &CreateLease,
    ) -> Result<Option<Application>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1 FOR UPDATE");
        let Some(application) = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let lease_id = LeaseRepo::create(&mut *tx, new_lease).await?.id;

        PropertyRepo::add_resident(
            &mut *tx,
            application.property_id,
            &application.tenant_cognito_id,
        )
        .await?;

        let query = format!(
            "UPDATE applications SET status = $2, lease_id = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let approved = sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(ApplicationStatus::Approved)
            .bind(lease_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(approved))
    }
}
