//! Handlers for the `/properties` resource.
//!
//! Create and update take `multipart/form-data`: text fields named after the
//! JSON properties (`pricePerMonth`, `isPetsAllowed`, ...), comma-separated
//! `amenities` / `highlights`, the address parts, and up to ten image files
//! in repeated `photos` fields.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::{Multipart, Path, Query, State};
use rentwise_cloud::{AddressQuery, PhotoUpload};
use rentwise_core::error::CoreError;
use rentwise_core::geo::Coordinates;
use rentwise_core::listing::{parse_flag, parse_number, split_list, FormNumber};
use rentwise_core::photos::{validate_photo, validate_photo_count};
use rentwise_core::search::{PropertyFilter, PropertySearchParams};
use rentwise_core::types::DbId;
use rentwise_core::validation::validate_input;
use rentwise_db::models::enums::parse_all;
use rentwise_db::models::location::CreateLocation;
use rentwise_db::models::property::{
    CreateProperty, Property, PropertyDetail, PropertyListing, UpdateProperty,
};
use rentwise_db::repositories::{ManagerRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Multipart field carrying image files.
const PHOTOS_FIELD: &str = "photos";

/// A parsed multipart property form.
#[derive(Debug, Default)]
struct PropertyForm {
    fields: HashMap<String, String>,
    photos: Vec<PhotoUpload>,
}

impl PropertyForm {
    /// Drain the multipart stream, checking each photo's type and size and
    /// the photo count as they arrive.
    async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == PHOTOS_FIELD {
                let filename = field.file_name().unwrap_or("photo").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;

                validate_photo(&content_type, data.len())?;
                validate_photo_count(form.photos.len() + 1)?;
                form.photos.push(PhotoUpload {
                    filename,
                    content_type,
                    bytes: data.to_vec(),
                });
            } else if !name.is_empty() {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.fields.insert(name, text);
            }
        }

        Ok(form)
    }

    /// Trimmed value of a text field; blank counts as absent.
    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, name: &str) -> Result<&str, CoreError> {
        self.text(name)
            .ok_or_else(|| CoreError::Validation(format!("{name} is required")))
    }

    fn number<T: FormNumber>(&self, name: &str) -> Result<Option<T>, CoreError> {
        self.text(name).map(|v| parse_number(name, v)).transpose()
    }

    fn required_number<T: FormNumber>(&self, name: &str) -> Result<T, CoreError> {
        parse_number(name, self.required(name)?)
    }

    fn flag(&self, name: &str) -> Result<Option<bool>, CoreError> {
        self.text(name).map(|v| parse_flag(name, v)).transpose()
    }

    fn labels<T: FromStr<Err = CoreError>>(&self, name: &str) -> Result<Option<Vec<T>>, CoreError> {
        self.text(name)
            .map(|v| parse_all(&split_list(v)))
            .transpose()
    }

    fn label<T: FromStr<Err = CoreError>>(&self, name: &str) -> Result<Option<T>, CoreError> {
        self.text(name).map(|v| v.parse::<T>()).transpose()
    }

    /// Build the insert DTO. Coordinates and photo URLs are filled in by the
    /// caller once geocoding and uploads have run.
    fn to_create(&self, manager_cognito_id: &str) -> Result<CreateProperty, CoreError> {
        Ok(CreateProperty {
            name: self.required("name")?.to_string(),
            description: self.text("description").unwrap_or_default().to_string(),
            price_per_month: self.required_number("pricePerMonth")?,
            security_deposit: self.required_number("securityDeposit")?,
            application_fee: self.required_number("applicationFee")?,
            photo_urls: Vec::new(),
            amenities: self.labels("amenities")?.unwrap_or_default(),
            highlights: self.labels("highlights")?.unwrap_or_default(),
            is_pets_allowed: self.flag("isPetsAllowed")?.unwrap_or(false),
            is_parking_included: self.flag("isParkingIncluded")?.unwrap_or(false),
            beds: self.required_number("beds")?,
            baths: self.required_number("baths")?,
            square_feet: self.required_number("squareFeet")?,
            property_type: self.required("propertyType")?.parse()?,
            manager_cognito_id: manager_cognito_id.to_string(),
            location: CreateLocation {
                address: self.required("address")?.to_string(),
                city: self.required("city")?.to_string(),
                state: self.required("state")?.to_string(),
                country: self.required("country")?.to_string(),
                postal_code: self.required("postalCode")?.to_string(),
                coordinates: Coordinates::ORIGIN,
            },
        })
    }

    /// Build the partial update DTO. Photos are handled by the caller.
    fn to_update(&self) -> Result<UpdateProperty, CoreError> {
        Ok(UpdateProperty {
            name: self.text("name").map(str::to_string),
            description: self.text("description").map(str::to_string),
            price_per_month: self.number("pricePerMonth")?,
            security_deposit: self.number("securityDeposit")?,
            application_fee: self.number("applicationFee")?,
            photo_urls: None,
            amenities: self.labels("amenities")?,
            highlights: self.labels("highlights")?,
            is_pets_allowed: self.flag("isPetsAllowed")?,
            is_parking_included: self.flag("isParkingIncluded")?,
            beds: self.number("beds")?,
            baths: self.number("baths")?,
            square_feet: self.number("squareFeet")?,
            property_type: self.label("propertyType")?,
            location_id: self.number("locationId")?,
        })
    }
}

async fn find_property(state: &AppState, id: DbId) -> AppResult<Property> {
    PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", id)))
}

fn ensure_owner(user: &AuthUser, property: &Property) -> Result<(), AppError> {
    if property.manager_cognito_id != user.cognito_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Access denied: property is managed by another account".into(),
        )));
    }
    Ok(())
}

/// GET /api/v1/properties
///
/// Public search. See [`PropertySearchParams`] for the accepted filters.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PropertySearchParams>,
) -> AppResult<ApiResponse<Vec<PropertyListing>>> {
    let filter = PropertyFilter::from_params(&params)?;
    let properties = PropertyRepo::search(&state.pool, &filter).await?;
    Ok(ApiResponse::ok("Properties retrieved successfully", properties))
}

/// GET /api/v1/properties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<PropertyDetail>> {
    let property = PropertyRepo::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", id)))?;
    Ok(ApiResponse::ok("Property retrieved successfully", property))
}

/// POST /api/v1/properties
///
/// The listing is owned by the calling manager. The address is geocoded
/// and photos are uploaded before anything is written.
pub async fn create(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    multipart: Multipart,
) -> AppResult<ApiResponse<PropertyListing>> {
    let form = PropertyForm::read(multipart).await?;
    let mut input = form.to_create(&user.cognito_id)?;
    validate_input(&input)?;

    ManagerRepo::find_by_cognito_id(&state.pool, &user.cognito_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Manager", &user.cognito_id)))?;

    let query = AddressQuery {
        address: input.location.address.clone(),
        city: input.location.city.clone(),
        country: input.location.country.clone(),
        postal_code: input.location.postal_code.clone(),
    };
    input.location.coordinates = state.geocoder.geocode(&query).await;

    let photo_count = form.photos.len();
    input.photo_urls = state.photo_store.upload_all(form.photos).await?;

    let listing = PropertyRepo::create(&state.pool, &input).await?;
    tracing::info!(
        property_id = listing.property.id,
        manager = %user.cognito_id,
        photo_count,
        store = state.photo_store.backend_tag(),
        "Property created",
    );
    Ok(ApiResponse::created("Property created successfully", listing))
}

/// PUT|PATCH /api/v1/properties/{id}
///
/// Partial update. Uploaded photos are appended to the existing ones.
pub async fn update(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<ApiResponse<Property>> {
    let existing = find_property(&state, id).await?;
    ensure_owner(&user, &existing)?;

    let form = PropertyForm::read(multipart).await?;
    let mut input = form.to_update()?;
    validate_input(&input)?;

    if !form.photos.is_empty() {
        let uploaded = state.photo_store.upload_all(form.photos).await?;
        let mut photo_urls = existing.photo_urls;
        photo_urls.extend(uploaded);
        input.photo_urls = Some(photo_urls);
    }

    let property = PropertyRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", id)))?;
    Ok(ApiResponse::ok("Property updated successfully", property))
}

/// DELETE /api/v1/properties/{id}
///
/// 409 while leases or applications reference the property.
pub async fn delete(
    State(state): State<AppState>,
    RequireManager(user): RequireManager,
    Path(id): Path<DbId>,
) -> AppResult<ApiResponse<Property>> {
    let existing = find_property(&state, id).await?;
    ensure_owner(&user, &existing)?;

    let property = PropertyRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Property", id)))?;
    tracing::info!(property_id = id, manager = %user.cognito_id, "Property deleted");
    Ok(ApiResponse::ok("Property deleted successfully", property))
}
