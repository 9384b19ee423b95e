use axum::routing::{get, post};
use axum::Router;

use crate::handlers::tenant;
use crate::state::AppState;

/// Routes mounted at `/tenants`.
///
/// ```text
/// GET    /                                       -> dashboard
/// POST   /                                       -> create
/// GET    /{cognito_id}                           -> get_by_cognito_id
/// PUT    /{cognito_id}                           -> update
/// GET    /{cognito_id}/current-residences        -> current_residences
/// POST   /{cognito_id}/favorites/{property_id}   -> add_favorite
/// DELETE /{cognito_id}/favorites/{property_id}   -> remove_favorite
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tenant::dashboard).post(tenant::create))
        .route(
            "/{cognito_id}",
            get(tenant::get_by_cognito_id).put(tenant::update),
        )
        .route(
            "/{cognito_id}/current-residences",
            get(tenant::current_residences),
        )
        .route(
            "/{cognito_id}/favorites/{property_id}",
            post(tenant::add_favorite).delete(tenant::remove_favorite),
        )
}
