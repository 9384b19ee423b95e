//! Shared helpers for the API integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use rentwise_api::auth::jwt::{issue_token, JwtConfig};
use rentwise_api::config::ServerConfig;
use rentwise_api::router::build_app_router;
use rentwise_api::state::AppState;
use rentwise_cloud::{FixedGeocoder, MemoryPhotoStore, NominatimConfig, S3Config};
use rentwise_core::geo::Coordinates;
use rentwise_core::roles::{ROLE_MANAGER, ROLE_TENANT};
use sqlx::PgPool;
use tower::ServiceExt;

/// Coordinates every address resolves to under test (downtown Portland).
pub const TEST_COORDINATES: Coordinates = Coordinates {
    longitude: -122.6765,
    latitude: 45.5231,
};

const MULTIPART_BOUNDARY: &str = "rentwise-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: Some("test-secret-that-is-long-enough-for-hmac".to_string()),
            leeway_secs: 0,
            ..JwtConfig::default()
        },
        storage: S3Config {
            region: "us-east-1".to_string(),
            bucket: "rentwise-test".to_string(),
            public_base_url: "https://photos.test".to_string(),
        },
        geocoding: NominatimConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            user_agent: "rentwise-tests".to_string(),
            timeout: Duration::from_secs(1),
        },
    }
}

/// Build the full application router over `pool` with the given photo store.
pub fn build_test_app_with_store(pool: PgPool, photo_store: Arc<MemoryPhotoStore>) -> Router {
    build_test_app_with(pool, photo_store, test_config())
}

/// Build the full application router with an explicit configuration.
pub fn build_test_app_with(
    pool: PgPool,
    photo_store: Arc<MemoryPhotoStore>,
    config: ServerConfig,
) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        photo_store,
        geocoder: Arc::new(FixedGeocoder(TEST_COORDINATES)),
    };
    build_app_router(state, &config)
}

/// Build the full application router with the production middleware stack,
/// an in-memory photo store and a fixed geocoder.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(MemoryPhotoStore::default()))
}

pub fn token_for(cognito_id: &str, role: &str) -> String {
    issue_token(cognito_id, role, 900, &test_config().jwt).unwrap()
}

pub fn tenant_token(cognito_id: &str) -> String {
    token_for(cognito_id, ROLE_TENANT)
}

pub fn manager_token(cognito_id: &str) -> String {
    token_for(cognito_id, ROLE_MANAGER)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

fn request(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, request(Method::GET, uri, token).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        request(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(
        app,
        request(method, uri, Some(token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, token, body).await
}

pub async fn put_json(app: Router, uri: &str, token: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, token, body).await
}

/// A file part of a multipart form.
pub struct FilePart<'a> {
    pub filename: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

/// Encode text fields and `photos` file parts as `multipart/form-data`.
pub fn multipart_body(fields: &[(&str, &str)], photos: &[FilePart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for photo in photos {
        body.extend_from_slice(
            format!(
                "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"photos\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                photo.filename, photo.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(photo.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    token: &str,
    fields: &[(&str, &str)],
    photos: &[FilePart<'_>],
) -> Response<Body> {
    send(
        app,
        request(method, uri, Some(token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields, photos)))
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn person(cognito_id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "cognitoId": cognito_id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        "phoneNumber": "555-0100",
    })
}

pub async fn create_tenant(pool: &PgPool, cognito_id: &str) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/tenants",
        &tenant_token(cognito_id),
        person(cognito_id, "Tina Tenant"),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}

pub async fn create_manager(pool: &PgPool, cognito_id: &str) {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/managers",
        &manager_token(cognito_id),
        person(cognito_id, "Max Manager"),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
}

/// Text fields of a complete property form.
pub fn property_fields(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("description", "Sunny two-bed near the park".to_string()),
        ("pricePerMonth", "1800".to_string()),
        ("securityDeposit", "900".to_string()),
        ("applicationFee", "50".to_string()),
        ("amenities", "Dishwasher,Parking".to_string()),
        ("highlights", "GreatView".to_string()),
        ("isPetsAllowed", "true".to_string()),
        ("isParkingIncluded", "false".to_string()),
        ("beds", "2".to_string()),
        ("baths", "1.5".to_string()),
        ("squareFeet", "850".to_string()),
        ("propertyType", "Apartment".to_string()),
        ("address", "12 Elm Street".to_string()),
        ("city", "Portland".to_string()),
        ("state", "OR".to_string()),
        ("country", "United States".to_string()),
        ("postalCode", "97201".to_string()),
    ]
}

/// Create a property through the API and return its id.
pub async fn create_property(pool: &PgPool, manager_cognito_id: &str, name: &str) -> i64 {
    let fields = property_fields(name);
    let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let response = send_multipart(
        build_test_app(pool.clone()),
        Method::POST,
        "/api/v1/properties",
        &manager_token(manager_cognito_id),
        &fields,
        &[],
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Submit an application through the API and return its JSON `data`.
pub async fn apply(pool: &PgPool, tenant_cognito_id: &str, property_id: i64) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/applications",
        &tenant_token(tenant_cognito_id),
        serde_json::json!({
            "applicationDate": "2025-03-01T10:00:00Z",
            "propertyId": property_id,
            "tenantCognitoId": tenant_cognito_id,
            "name": "Tina Tenant",
            "email": "tina@example.com",
            "phoneNumber": "555-0100",
            "message": "Quiet, no smoking",
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
