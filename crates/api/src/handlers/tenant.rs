//! Handlers for the `/tenants` resource.

use axum::extract::{Path, State};
use axum::Json;
use rentwise_core::error::CoreError;
use rentwise_core::types::DbId;
use rentwise_core::validation::validate_input;
use rentwise_db::models::property::PropertyListing;
use rentwise_db::models::tenant::{CreateTenant, Tenant, TenantDetail, UpdateTenant};
use rentwise_db::repositories::{PropertyRepo, TenantRepo};

use super::{ensure_self, DashboardUser};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireTenant;
use crate::response::ApiResponse;
use crate::state::AppState;

async fn find_tenant(state: &AppState, cognito_id: &str) -> AppResult<Tenant> {
    TenantRepo::find_by_cognito_id(&state.pool, cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tenant", cognito_id)))
}

/// GET /api/v1/tenants
pub async fn dashboard(RequireTenant(user): RequireTenant) -> ApiResponse<DashboardUser> {
    ApiResponse::ok("Welcome to tenant dashboard", user.into())
}

/// POST /api/v1/tenants
pub async fn create(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Json(input): Json<CreateTenant>,
) -> AppResult<ApiResponse<Tenant>> {
    validate_input(&input)?;
    ensure_self(&user, &input.cognito_id)?;

    if TenantRepo::find_by_cognito_id(&state.pool, &input.cognito_id)
        .await?
        .is_some()
    {
        tracing::warn!(cognito_id = %input.cognito_id, "Tenant already exists");
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Tenant with cognitoId {} already exists",
            input.cognito_id
        ))));
    }

    let tenant = TenantRepo::create(&state.pool, &input).await?;
    tracing::info!(tenant_id = tenant.id, cognito_id = %tenant.cognito_id, "Tenant created");
    Ok(ApiResponse::created("Tenant created successfully", tenant))
}

/// GET /api/v1/tenants/{cognito_id}
pub async fn get_by_cognito_id(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Path(cognito_id): Path<String>,
) -> AppResult<ApiResponse<TenantDetail>> {
    ensure_self(&user, &cognito_id)?;
    let tenant = TenantRepo::find_detail(&state.pool, &cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tenant", &cognito_id)))?;
    Ok(ApiResponse::ok("Tenant retrieved successfully", tenant))
}

/// PUT /api/v1/tenants/{cognito_id}
pub async fn update(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Path(cognito_id): Path<String>,
    Json(input): Json<UpdateTenant>,
) -> AppResult<ApiResponse<Tenant>> {
    ensure_self(&user, &cognito_id)?;
    validate_input(&input)?;
    let tenant = TenantRepo::update(&state.pool, &cognito_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tenant", &cognito_id)))?;
    Ok(ApiResponse::ok("Tenant updated successfully", tenant))
}

/// GET /api/v1/tenants/{cognito_id}/current-residences
pub async fn current_residences(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Path(cognito_id): Path<String>,
) -> AppResult<ApiResponse<Vec<PropertyListing>>> {
    ensure_self(&user, &cognito_id)?;
    let tenant = find_tenant(&state, &cognito_id).await?;
    let residences = PropertyRepo::list_resided_by(&state.pool, tenant.id).await?;
    Ok(ApiResponse::ok(
        "Current residences retrieved successfully",
        residences,
    ))
}

/// POST /api/v1/tenants/{cognito_id}/favorites/{property_id}
///
/// Responds with the tenant's favorites after the change.
pub async fn add_favorite(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Path((cognito_id, property_id)): Path<(String, DbId)>,
) -> AppResult<ApiResponse<Vec<PropertyListing>>> {
    ensure_self(&user, &cognito_id)?;
    let tenant = find_tenant(&state, &cognito_id).await?;
    PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", property_id)))?;

    if !TenantRepo::add_favorite(&state.pool, tenant.id, property_id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Property already added as favorite".into(),
        )));
    }

    let favorites = PropertyRepo::list_favorited_by(&state.pool, tenant.id).await?;
    Ok(ApiResponse::ok("Favorite added successfully", favorites))
}

/// DELETE /api/v1/tenants/{cognito_id}/favorites/{property_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Path((cognito_id, property_id)): Path<(String, DbId)>,
) -> AppResult<ApiResponse<Vec<PropertyListing>>> {
    ensure_self(&user, &cognito_id)?;
    let tenant = find_tenant(&state, &cognito_id).await?;

    if !TenantRepo::remove_favorite(&state.pool, tenant.id, property_id).await? {
        return Err(AppError::Core(CoreError::not_found("Favorite", property_id)));
    }

    let favorites = PropertyRepo::list_favorited_by(&state.pool, tenant.id).await?;
    Ok(ApiResponse::ok("Favorite removed successfully", favorites))
}
