//! Rental application model, DTOs and composites.

use rentwise_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::enums::ApplicationStatus;
use crate::models::lease::{Lease, LeaseWithNextPayment};
use crate::models::manager::Manager;
use crate::models::property::Property;
use crate::models::tenant::Tenant;

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: DbId,
    pub application_date: Timestamp,
    pub status: ApplicationStatus,
    pub property_id: DbId,
    pub tenant_cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
    pub lease_id: Option<DbId>,
}

/// DTO for submitting an application. New applications always start
/// `Pending`; a `status` in the request body is ignored.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplication {
    pub application_date: Timestamp,
    pub property_id: DbId,
    #[validate(length(min = 1))]
    pub tenant_cognito_id: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub phone_number: String,
    pub message: Option<String>,
}

/// DTO for `PUT /applications/{id}/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateApplicationStatus {
    pub status: ApplicationStatus,
}

/// Which applications a listing should include.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationScope {
    All,
    /// Applications submitted by the tenant with this Cognito ID.
    Tenant(String),
    /// Applications to properties managed by this Cognito ID.
    Manager(String),
}

/// An application with its property, tenant and lease.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetail {
    #[serde(flatten)]
    pub application: Application,
    pub property: Property,
    pub tenant: Tenant,
    pub lease: Option<Lease>,
}

/// An application with its property (tenant dashboard).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithProperty {
    #[serde(flatten)]
    pub application: Application,
    pub property: Property,
}

/// A property with its street address inlined, as application listings show it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyWithAddress {
    #[serde(flatten)]
    pub property: Property,
    pub address: String,
}

/// One entry of `GET /applications`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationListing {
    #[serde(flatten)]
    pub application: Application,
    pub property: PropertyWithAddress,
    pub manager: Manager,
    pub tenant: Tenant,
    /// The tenant's most recent lease on this property.
    pub lease: Option<LeaseWithNextPayment>,
}
