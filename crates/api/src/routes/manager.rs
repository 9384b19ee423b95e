use axum::routing::get;
use axum::Router;

use crate::handlers::manager;
use crate::state::AppState;

/// Routes mounted at `/managers`.
///
/// ```text
/// GET    /                          -> dashboard
/// POST   /                          -> create
/// GET    /{cognito_id}              -> get_by_cognito_id
/// PUT    /{cognito_id}              -> update
/// PATCH  /{cognito_id}              -> update
/// GET    /{cognito_id}/properties   -> list_properties
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(manager::dashboard).post(manager::create))
        .route(
            "/{cognito_id}",
            get(manager::get_by_cognito_id)
                .put(manager::update)
                .patch(manager::update),
        )
        .route("/{cognito_id}/properties", get(manager::list_properties))
}
