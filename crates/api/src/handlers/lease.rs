//! Handlers for the `/leases` resource.

use axum::extract::{Path, State};
use rentwise_core::error::CoreError;
use rentwise_core::types::DbId;
use rentwise_db::models::lease::LeaseWithParties;
use rentwise_db::models::payment::Payment;
use rentwise_db::repositories::{LeaseRepo, PaymentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/leases
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<ApiResponse<Vec<LeaseWithParties>>> {
    let leases = LeaseRepo::list_with_parties(&state.pool).await?;
    Ok(ApiResponse::ok("Leases retrieved successfully", leases))
}

/// GET /api/v1/leases/{id}/payments
pub async fn list_payments(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Vec<Payment>>> {
    LeaseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Lease", id)))?;

    let payments = PaymentRepo::list_by_lease(&state.pool, id).await?;
    Ok(ApiResponse::ok(
        "Lease payments retrieved successfully",
        payments,
    ))
}
