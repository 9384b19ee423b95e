use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use rentwise_core::photos::{MAX_PHOTOS_PER_REQUEST, MAX_PHOTO_BYTES};

use crate::handlers::property;
use crate::state::AppState;

/// Allowance for the text fields of a property form.
const FORM_FIELDS_BYTES: usize = 1024 * 1024;

/// Routes mounted at `/properties`.
///
/// ```text
/// GET    /        -> list (public search)
/// POST   /        -> create (multipart)
/// GET    /{id}    -> get_by_id (public)
/// PUT    /{id}    -> update (multipart)
/// PATCH  /{id}    -> update (multipart)
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(property::list).post(property::create))
        .route(
            "/{id}",
            get(property::get_by_id)
                .put(property::update)
                .patch(property::update)
                .delete(property::delete),
        )
        .layer(DefaultBodyLimit::max(
            MAX_PHOTOS_PER_REQUEST * MAX_PHOTO_BYTES + FORM_FIELDS_BYTES,
        ))
}
