//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    /// `ok` when every dependency answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// `up` or `down`.
    pub database: &'static str,
    /// Which photo backend the process was started with.
    pub photo_store: &'static str,
}

/// GET /health
///
/// 503 while the database is unreachable so load balancers drain the node.
async fn service_health(State(state): State<AppState>) -> (StatusCode, Json<ServiceHealth>) {
    let database_up = match rentwise_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let (code, status, database) = if database_up {
        (StatusCode::OK, "ok", "up")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "down")
    };

    (
        code,
        Json(ServiceHealth {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            photo_store: state.photo_store.backend_tag(),
        }),
    )
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(service_health))
}
