//! Shared response envelope for API handlers.
//!
//! Every successful response is `{ "status": <code>, "message": ..., "data": ... }`.
//! Handlers return [`ApiResponse`] instead of ad-hoc `json!` bodies so the
//! envelope stays consistent and the HTTP status matches the `status` field.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip)]
    code: StatusCode,
    pub status: u16,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_status(code: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            status: code.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// `200 OK`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// `201 Created`.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.code, Json(self)).into_response()
    }
}
