use axum::routing::{get, put};
use axum::Router;

use crate::handlers::application;
use crate::state::AppState;

/// Routes mounted at `/applications`.
///
/// ```text
/// GET    /              -> list (?userId=&userType=)
/// POST   /              -> create
/// PUT    /{id}/status   -> update_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(application::list).post(application::create))
        .route("/{id}/status", put(application::update_status))
}
