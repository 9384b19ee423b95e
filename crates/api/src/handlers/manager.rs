//! Handlers for the `/managers` resource.

use axum::extract::{Path, State};
use axum::Json;
use rentwise_core::error::CoreError;
use rentwise_core::validation::validate_input;
use rentwise_db::models::manager::{CreateManager, Manager, ManagerDetail, UpdateManager};
use rentwise_db::models::property::PropertyListing;
use rentwise_db::repositories::{ManagerRepo, PropertyRepo};

use super::{ensure_self, DashboardUser};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManager;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/managers
pub async fn dashboard(RequireManager(user): RequireManager) -> ApiResponse<DashboardUser> {
    ApiResponse::ok("Welcome to manager dashboard", user.into())
}

/// POST /api/v1/managers
pub async fn create(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Json(input): Json<CreateManager>,
) -> AppResult<ApiResponse<Manager>> {
    validate_input(&input)?;
    ensure_self(&user, &input.cognito_id)?;

    if ManagerRepo::find_by_cognito_id(&state.pool, &input.cognito_id)
        .await?
        .is_some()
    {
        tracing::warn!(cognito_id = %input.cognito_id, "Manager already exists");
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Manager with cognitoId {} already exists",
            input.cognito_id
        ))));
    }

    let manager = ManagerRepo::create(&state.pool, &input).await?;
    tracing::info!(manager_id = manager.id, cognito_id = %manager.cognito_id, "Manager created");
    Ok(ApiResponse::created("Manager created successfully", manager))
}

/// GET /api/v1/managers/{cognito_id}
pub async fn get_by_cognito_id(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(cognito_id): Path<String>,
) -> AppResult<ApiResponse<ManagerDetail>> {
    ensure_self(&user, &cognito_id)?;
    let manager = ManagerRepo::find_detail(&state.pool, &cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Manager", &cognito_id)))?;
    Ok(ApiResponse::ok("Manager retrieved successfully", manager))
}

/// PUT|PATCH /api/v1/managers/{cognito_id}
pub async fn update(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(cognito_id): Path<String>,
    Json(input): Json<UpdateManager>,
) -> AppResult<ApiResponse<Manager>> {
    ensure_self(&user, &cognito_id)?;
    validate_input(&input)?;
    let manager = ManagerRepo::update(&state.pool, &cognito_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Manager", &cognito_id)))?;
    Ok(ApiResponse::ok("Manager updated successfully", manager))
}

/// GET /api/v1/managers/{cognito_id}/properties
pub async fn list_properties(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(cognito_id): Path<String>,
) -> AppResult<ApiResponse<Vec<PropertyListing>>> {
    ensure_self(&user, &cognito_id)?;
    ManagerRepo::find_by_cognito_id(&state.pool, &cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Manager", &cognito_id)))?;

    let properties = PropertyRepo::list_by_manager(&state.pool, &cognito_id).await?;
    Ok(ApiResponse::ok(
        "Manager properties retrieved successfully",
        properties,
    ))
}
