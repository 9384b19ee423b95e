//! Repository for the `payments` table.

use rentwise_core::types::DbId;
use sqlx::PgPool;

use crate::models::payment::{CreatePayment, Payment};

const COLUMNS: &str =
    "id, amount_due, amount_paid, due_date, payment_date, payment_status, lease_id";

/// Provides access to lease payments.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Record a payment due on a lease.
    pub async fn create(pool: &PgPool, input: &CreatePayment) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments
                (amount_due, amount_paid, due_date, payment_date, payment_status, lease_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(input.amount_due)
            .bind(input.amount_paid)
            .bind(input.due_date)
            .bind(input.payment_date)
            .bind(input.payment_status)
            .bind(input.lease_id)
            .fetch_one(pool)
            .await
    }

    /// List a lease's payments, earliest due date first.
    pub async fn list_by_lease(pool: &PgPool, lease_id: DbId) -> Result<Vec<Payment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM payments WHERE lease_id = $1 ORDER BY due_date, id");
        sqlx::query_as::<_, Payment>(&query)
            .bind(lease_id)
            .fetch_all(pool)
            .await
    }
}
