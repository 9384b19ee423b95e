//! Manager entity model and DTOs.

use rentwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::application::Application;
use crate::models::lease::Lease;
use crate::models::property::PropertyListing;

/// A row from the `managers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: DbId,
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a manager on first sign-in.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateManager {
    #[validate(length(min = 1))]
    pub cognito_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
}

/// DTO for updating a manager's contact details. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManager {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 1))]
    pub phone_number: Option<String>,
}

/// A managed property together with its leases and applications.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedProperty {
    #[serde(flatten)]
    pub listing: PropertyListing,
    pub leases: Vec<Lease>,
    pub applications: Vec<Application>,
}

/// A manager with everything the manager dashboard shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDetail {
    #[serde(flatten)]
    pub manager: Manager,
    pub managed_properties: Vec<ManagedProperty>,
}
