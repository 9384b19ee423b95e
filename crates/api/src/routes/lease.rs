use axum::routing::get;
use axum::Router;

use crate::handlers::lease;
use crate::state::AppState;

/// Routes mounted at `/leases`.
///
/// ```text
/// GET    /                -> list
/// GET    /{id}/payments   -> list_payments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lease::list))
        .route("/{id}/payments", get(lease::list_payments))
}
