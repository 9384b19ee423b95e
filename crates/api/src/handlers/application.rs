//! Handlers for the `/applications` resource.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use rentwise_core::error::CoreError;
use rentwise_core::lease_terms::lease_end;
use rentwise_core::roles::{ROLE_MANAGER, ROLE_TENANT};
use rentwise_core::types::{DbId, Timestamp};
use rentwise_core::validation::validate_input;
use rentwise_db::models::application::{
    ApplicationDetail, ApplicationListing, ApplicationScope, CreateApplication,
    UpdateApplicationStatus,
};
use rentwise_db::models::enums::ApplicationStatus;
use rentwise_db::models::lease::CreateLease;
use rentwise_db::models::property::Property;
use rentwise_db::repositories::{ApplicationRepo, PropertyRepo, TenantRepo};
use serde::Deserialize;

use super::ensure_self;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireManager, RequireTenant};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Query parameters for `GET /applications`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationQuery {
    pub user_id: Option<String>,
    /// `tenant` or `manager`.
    pub user_type: Option<String>,
}

impl ApplicationQuery {
    /// Both parameters select a scope; either one alone lists everything.
    fn scope(&self) -> Result<ApplicationScope, CoreError> {
        let (Some(user_id), Some(user_type)) = (&self.user_id, &self.user_type) else {
            return Ok(ApplicationScope::All);
        };
        match user_type.as_str() {
            ROLE_TENANT => Ok(ApplicationScope::Tenant(user_id.clone())),
            ROLE_MANAGER => Ok(ApplicationScope::Manager(user_id.clone())),
            other => Err(CoreError::Validation(format!(
                "userType must be tenant or manager, got '{other}'"
            ))),
        }
    }
}

/// A twelve-month lease on `property` for the applicant, starting at `start`.
fn lease_for(property: &Property, tenant_cognito_id: &str, start: Timestamp) -> AppResult<CreateLease> {
    let end_date = lease_end(start)
        .ok_or_else(|| AppError::InternalError(format!("Lease end out of range for {start}")))?;
    Ok(CreateLease {
        start_date: start,
        end_date,
        rent: property.price_per_month,
        deposit: property.security_deposit,
        property_id: property.id,
        tenant_cognito_id: tenant_cognito_id.to_string(),
    })
}

/// GET /api/v1/applications?userId=&userType=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(query): Query<ApplicationQuery>,
) -> AppResult<ApiResponse<Vec<ApplicationListing>>> {
    let scope = query.scope()?;
    let applications = ApplicationRepo::list_listings(&state.pool, &scope, Utc::now()).await?;
    Ok(ApiResponse::ok(
        "Applications retrieved successfully",
        applications,
    ))
}

/// POST /api/v1/applications
///
/// Creates the application together with its pending lease.
pub async fn create(
    State(state): State<AppState>,
    RequireTenant(user): RequireTenant,
    Json(input): Json<CreateApplication>,
) -> AppResult<ApiResponse<ApplicationDetail>> {
    validate_input(&input)?;
    ensure_self(&user, &input.tenant_cognito_id)?;

    let property = PropertyRepo::find_by_id(&state.pool, input.property_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", input.property_id)))?;
    TenantRepo::find_by_cognito_id(&state.pool, &input.tenant_cognito_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found("Tenant", &input.tenant_cognito_id))
        })?;

    let lease = lease_for(&property, &input.tenant_cognito_id, Utc::now())?;
    let application = ApplicationRepo::create_with_lease(&state.pool, &input, &lease).await?;
    tracing::info!(
        application_id = application.application.id,
        property_id = property.id,
        tenant = %input.tenant_cognito_id,
        "Application submitted",
    );
    Ok(ApiResponse::created(
        "Application created successfully",
        application,
    ))
}

/// PUT /api/v1/applications/{id}/status
///
/// Approving opens a new lease starting now, links it to the application and
/// adds the applicant to the property's residents. Other statuses only change
/// the status.
pub async fn update_status(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApplicationStatus>,
) -> AppResult<ApiResponse<ApplicationDetail>> {
    let current = ApplicationRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;

    if current.property.manager_cognito_id != user.cognito_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Access denied: property is managed by another account".into(),
        )));
    }

    let updated = match input.status {
        ApplicationStatus::Approved => {
            let lease = lease_for(
                &current.property,
                &current.application.tenant_cognito_id,
                Utc::now(),
            )?;
            ApplicationRepo::approve(&state.pool, id, &lease).await?
        }
        status => ApplicationRepo::set_status(&state.pool, id, status).await?,
    };
    updated.ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;

    tracing::info!(
        application_id = id,
        from = %current.application.status,
        to = %input.status,
        "Application status changed",
    );

    let detail = ApplicationRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Application", id)))?;
    Ok(ApiResponse::ok(
        "Application status updated successfully",
        detail,
    ))
}
