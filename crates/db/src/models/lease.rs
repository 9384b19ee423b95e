//! Lease entity model and composites.

use rentwise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::payment::Payment;
use crate::models::property::Property;
use crate::models::tenant::Tenant;

/// A row from the `leases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    pub id: DbId,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub rent: f64,
    pub deposit: f64,
    pub property_id: DbId,
    pub tenant_cognito_id: String,
}

/// DTO for inserting a lease.
#[derive(Debug, Clone)]
pub struct CreateLease {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub rent: f64,
    pub deposit: f64,
    pub property_id: DbId,
    pub tenant_cognito_id: String,
}

/// A lease with its tenant and property (`GET /leases`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseWithParties {
    #[serde(flatten)]
    pub lease: Lease,
    pub tenant: Tenant,
    pub property: Property,
}

/// A lease with its property and payment history (tenant dashboard).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseWithPayments {
    #[serde(flatten)]
    pub lease: Lease,
    pub property: Property,
    pub payments: Vec<Payment>,
}

/// A lease annotated with the next rent due date (application listings).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaseWithNextPayment {
    #[serde(flatten)]
    pub lease: Lease,
    pub next_payment_date: Option<Timestamp>,
}
