//! Payment entity model.

use rentwise_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::enums::PaymentStatus;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: DbId,
    pub amount_due: f64,
    pub amount_paid: f64,
    pub due_date: Timestamp,
    pub payment_date: Option<Timestamp>,
    pub payment_status: PaymentStatus,
    pub lease_id: DbId,
}

/// DTO for recording a payment due on a lease.
#[derive(Debug, Clone)]
pub struct CreatePayment {
    pub lease_id: DbId,
    pub amount_due: f64,
    pub amount_paid: f64,
    pub due_date: Timestamp,
    pub payment_date: Option<Timestamp>,
    pub payment_status: PaymentStatus,
}
