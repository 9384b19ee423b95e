//! Property entity model, listing composites and DTOs.

use rentwise_core::geo::Coordinates;
use rentwise_core::types::{DbId, Timestamp};
use rentwise_core::validation::finite;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

use crate::models::application::Application;
use crate::models::enums::{Amenity, Highlight, PropertyType};
use crate::models::lease::Lease;
use crate::models::location::{CreateLocation, Location};
use crate::models::manager::Manager;

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price_per_month: f64,
    pub security_deposit: f64,
    pub application_fee: f64,
    pub photo_urls: Vec<String>,
    pub amenities: Vec<Amenity>,
    pub highlights: Vec<Highlight>,
    pub is_pets_allowed: bool,
    pub is_parking_included: bool,
    pub beds: i32,
    pub baths: f64,
    pub square_feet: i32,
    pub property_type: PropertyType,
    pub posted_date: Timestamp,
    pub average_rating: Option<f64>,
    pub number_of_reviews: Option<i32>,
    pub location_id: DbId,
    pub manager_cognito_id: String,
}

/// A property row joined with its location, location columns prefixed `loc_`.
#[derive(Debug, Clone, FromRow)]
pub struct PropertyListingRow {
    #[sqlx(flatten)]
    pub property: Property,
    pub loc_address: String,
    pub loc_city: String,
    pub loc_state: String,
    pub loc_country: String,
    pub loc_postal_code: String,
    pub loc_longitude: f64,
    pub loc_latitude: f64,
}

/// A property with its location: the unit of search results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    #[serde(flatten)]
    pub property: Property,
    pub location: Location,
}

impl From<PropertyListingRow> for PropertyListing {
    fn from(row: PropertyListingRow) -> Self {
        let location = Location {
            id: row.property.location_id,
            address: row.loc_address,
            city: row.loc_city,
            state: row.loc_state,
            country: row.loc_country,
            postal_code: row.loc_postal_code,
            coordinates: Coordinates::new(row.loc_longitude, row.loc_latitude),
        };
        Self {
            property: row.property,
            location,
        }
    }
}

/// A property with everything its detail page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetail {
    #[serde(flatten)]
    pub listing: PropertyListing,
    pub manager: Manager,
    pub leases: Vec<Lease>,
    pub applications: Vec<Application>,
}

/// DTO for creating a property. Built from the multipart form after the
/// address has been geocoded and photos uploaded.
///
/// Monetary fields are in the listing currency; `baths` allows halves.
#[derive(Debug, Clone, Validate)]
pub struct CreateProperty {
    #[validate(length(min = 1))]
    pub name: String,
    pub description: String,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub price_per_month: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub security_deposit: f64,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub application_fee: f64,
    pub photo_urls: Vec<String>,
    pub amenities: Vec<Amenity>,
    pub highlights: Vec<Highlight>,
    pub is_pets_allowed: bool,
    pub is_parking_included: bool,
    #[validate(range(min = 0))]
    pub beds: i32,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub baths: f64,
    #[validate(range(min = 0))]
    pub square_feet: i32,
    pub property_type: PropertyType,
    pub manager_cognito_id: String,
    /// Inserted alongside the property in one transaction.
    pub location: CreateLocation,
}

/// DTO for a partial property update. `None` leaves a column unchanged.
///
/// `photo_urls`, when present, replaces the stored list; callers append new
/// uploads to the existing URLs before building this.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateProperty {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub price_per_month: Option<f64>,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub security_deposit: Option<f64>,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub application_fee: Option<f64>,
    pub photo_urls: Option<Vec<String>>,
    pub amenities: Option<Vec<Amenity>>,
    pub highlights: Option<Vec<Highlight>>,
    pub is_pets_allowed: Option<bool>,
    pub is_parking_included: Option<bool>,
    #[validate(range(min = 0))]
    pub beds: Option<i32>,
    #[validate(range(min = 0.0), custom(function = "finite"))]
    pub baths: Option<f64>,
    #[validate(range(min = 0))]
    pub square_feet: Option<i32>,
    pub property_type: Option<PropertyType>,
    pub location_id: Option<DbId>,
}
