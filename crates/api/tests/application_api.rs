mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

const MANAGER: &str = "manager-xyz";
const TENANT: &str = "tenant-abc";

/// Manager, tenant and one listing. Returns the property id.
async fn seed(pool: &PgPool) -> i64 {
    common::create_manager(pool, MANAGER).await;
    common::create_tenant(pool, TENANT).await;
    common::create_property(pool, MANAGER, "Elm Flat").await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_opens_pending_lease(pool: PgPool) {
    let property_id = seed(&pool).await;

    let data = common::apply(&pool, TENANT, property_id).await;
    assert_eq!(data["status"], "Pending");
    assert_eq!(data["propertyId"], property_id);
    assert_eq!(data["tenant"]["cognitoId"], TENANT);
    assert_eq!(data["property"]["name"], "Elm Flat");

    let lease = &data["lease"];
    assert_eq!(lease["rent"], 1800.0);
    assert_eq!(lease["deposit"], 900.0);
    assert_eq!(lease["tenantCognitoId"], TENANT);
    assert_eq!(data["leaseId"], lease["id"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_ignores_requested_status(pool: PgPool) {
    let property_id = seed(&pool).await;
    let app = common::build_test_app(pool);

    let response = common::post_json(
        app.clone(),
        "/api/v1/applications",
        &common::tenant_token(TENANT),
        json!({
            "applicationDate": "2025-03-01T10:00:00Z",
            "status": "Approved",
            "propertyId": property_id,
            "tenantCognitoId": TENANT,
            "name": "Tina Tenant",
            "email": "tina@example.com",
            "phoneNumber": "555-0100",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(common::body_json(response).await["data"]["status"], "Pending");

    let response = common::get(
        app,
        &format!("/api/v1/tenants/{TENANT}/current-residences"),
        Some(&common::tenant_token(TENANT)),
    )
    .await;
    assert_eq!(common::body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_for_unknown_property_is_404(pool: PgPool) {
    common::create_tenant(&pool, TENANT).await;

    let response = common::post_json(
        common::build_test_app(pool),
        "/api/v1/applications",
        &common::tenant_token(TENANT),
        json!({
            "applicationDate": "2025-03-01T10:00:00Z",
            "propertyId": 777,
            "tenantCognitoId": TENANT,
            "name": "Tina Tenant",
            "email": "tina@example.com",
            "phoneNumber": "555-0100",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_on_behalf_of_another_tenant_is_403(pool: PgPool) {
    let property_id = seed(&pool).await;

    let response = common::post_json(
        common::build_test_app(pool),
        "/api/v1/applications",
        &common::tenant_token("tenant-other"),
        json!({
            "applicationDate": "2025-03-01T10:00:00Z",
            "propertyId": property_id,
            "tenantCognitoId": TENANT,
            "name": "Tina Tenant",
            "email": "tina@example.com",
            "phoneNumber": "555-0100",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_makes_tenant_a_resident(pool: PgPool) {
    let property_id = seed(&pool).await;
    let application = common::apply(&pool, TENANT, property_id).await;
    let id = application["id"].as_i64().unwrap();
    let app = common::build_test_app(pool);

    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/applications/{id}/status"),
        &common::manager_token(MANAGER),
        json!({ "status": "Approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = common::body_json(response).await;
    assert_eq!(json["message"], "Application status updated successfully");
    assert_eq!(json["data"]["status"], "Approved");
    let lease = &json["data"]["lease"];
    assert_eq!(json["data"]["leaseId"], lease["id"]);
    assert_ne!(lease["id"], application["leaseId"]);
    assert_eq!(lease["rent"], 1800.0);
    let approved_start = lease["startDate"].as_str().unwrap().parse::<DateTime<Utc>>().unwrap();
    let submitted_start = application["lease"]["startDate"]
        .as_str()
        .unwrap()
        .parse::<DateTime<Utc>>()
        .unwrap();
    assert!(approved_start >= submitted_start);

    let response = common::get(
        app,
        &format!("/api/v1/tenants/{TENANT}/current-residences"),
        Some(&common::tenant_token(TENANT)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let residences = common::body_json(response).await["data"].clone();
    assert_eq!(residences.as_array().unwrap().len(), 1);
    assert_eq!(residences[0]["id"], property_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deny_leaves_residents_untouched(pool: PgPool) {
    let property_id = seed(&pool).await;
    let id = common::apply(&pool, TENANT, property_id).await["id"]
        .as_i64()
        .unwrap();
    let app = common::build_test_app(pool);

    let response = common::put_json(
        app.clone(),
        &format!("/api/v1/applications/{id}/status"),
        &common::manager_token(MANAGER),
        json!({ "status": "Denied" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["data"]["status"], "Denied");

    let response = common::get(
        app,
        &format!("/api/v1/tenants/{TENANT}/current-residences"),
        Some(&common::tenant_token(TENANT)),
    )
    .await;
    assert_eq!(common::body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn approve_after_deny_opens_lease(pool: PgPool) {
    let property_id = seed(&pool).await;
    let application = common::apply(&pool, TENANT, property_id).await;
    let id = application["id"].as_i64().unwrap();
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/applications/{id}/status");
    let token = common::manager_token(MANAGER);

    let response = common::put_json(app.clone(), &uri, &token, json!({ "status": "Denied" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = common::put_json(app.clone(), &uri, &token, json!({ "status": "Approved" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = common::body_json(response).await["data"].clone();
    assert_eq!(data["status"], "Approved");
    assert!(data["lease"]["id"].is_i64());
    assert_ne!(data["leaseId"], application["leaseId"]);

    let response = common::get(
        app,
        &format!("/api/v1/tenants/{TENANT}/current-residences"),
        Some(&common::tenant_token(TENANT)),
    )
    .await;
    let residences = common::body_json(response).await["data"].clone();
    assert_eq!(residences.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_change_by_other_manager_is_403(pool: PgPool) {
    let property_id = seed(&pool).await;
    let id = common::apply(&pool, TENANT, property_id).await["id"]
        .as_i64()
        .unwrap();

    let response = common::put_json(
        common::build_test_app(pool),
        &format!("/api/v1/applications/{id}/status"),
        &common::manager_token("manager-other"),
        json!({ "status": "Approved" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_status_is_rejected(pool: PgPool) {
    let property_id = seed(&pool).await;
    let id = common::apply(&pool, TENANT, property_id).await["id"]
        .as_i64()
        .unwrap();

    let response = common::put_json(
        common::build_test_app(pool),
        &format!("/api/v1/applications/{id}/status"),
        &common::manager_token(MANAGER),
        json!({ "status": "Maybe" }),
    )
    .await;
    assert!(response.status().is_client_error());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn status_of_missing_application_is_404(pool: PgPool) {
    let response = common::put_json(
        common::build_test_app(pool),
        "/api/v1/applications/31337/status",
        &common::manager_token(MANAGER),
        json!({ "status": "Denied" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_is_scoped_by_user(pool: PgPool) {
    let property_id = seed(&pool).await;
    common::create_tenant(&pool, "tenant-two").await;
    common::apply(&pool, TENANT, property_id).await;
    common::apply(&pool, "tenant-two", property_id).await;
    let app = common::build_test_app(pool);
    let token = common::tenant_token(TENANT);

    let response = common::get(app.clone(), "/api/v1/applications", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = common::get(
        app.clone(),
        &format!("/api/v1/applications?userId={TENANT}&userType=tenant"),
        Some(&token),
    )
    .await;
    let data = common::body_json(response).await["data"].clone();
    assert_eq!(data.as_array().unwrap().len(), 1);
    let listing = &data[0];
    assert_eq!(listing["tenantCognitoId"], TENANT);
    assert_eq!(listing["property"]["address"], "12 Elm Street");
    assert_eq!(listing["manager"]["cognitoId"], MANAGER);
    assert!(listing["lease"]["nextPaymentDate"].is_string());

    let response = common::get(
        app.clone(),
        &format!("/api/v1/applications?userId={MANAGER}&userType=manager"),
        Some(&token),
    )
    .await;
    assert_eq!(common::body_json(response).await["data"].as_array().unwrap().len(), 2);

    let response = common::get(
        app,
        &format!("/api/v1/applications?userId={TENANT}&userType=landlord"),
        Some(&token),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_requires_token(pool: PgPool) {
    let response = common::get(common::build_test_app(pool), "/api/v1/applications", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
