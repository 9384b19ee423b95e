//! Property search filters.
//!
//! The dashboard sends every filter as a string query parameter. This module
//! turns them into a typed [`PropertyFilter`] which the repository layer
//! translates into SQL predicates.

use chrono::{NaiveDate, TimeZone, Utc};
use serde::Deserialize;

use crate::error::CoreError;
use crate::geo::Coordinates;
use crate::listing::{parse_number, split_list, validate_amenity, validate_property_type, ANY};
use crate::types::{DbId, Timestamp};

/// Raw `GET /properties` query parameters.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySearchParams {
    pub favorite_ids: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub beds: Option<String>,
    pub baths: Option<String>,
    pub property_type: Option<String>,
    pub square_feet_min: Option<String>,
    pub square_feet_max: Option<String>,
    pub amenities: Option<String>,
    pub available_from: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

/// Typed property search filter. Every field is optional; an empty filter
/// matches all properties.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropertyFilter {
    pub favorite_ids: Vec<DbId>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub beds_min: Option<i32>,
    pub baths_min: Option<f64>,
    pub property_type: Option<String>,
    pub square_feet_min: Option<i32>,
    pub square_feet_max: Option<i32>,
    /// A property must offer every listed amenity.
    pub amenities: Vec<String>,
    /// A lease on the property must start on or before this instant.
    pub available_from: Option<Timestamp>,
    pub near: Option<Coordinates>,
}

/// Trimmed, non-empty value of a query parameter.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Like [`present`], but also treats the `any` sentinel as absent.
fn constrained(value: &Option<String>) -> Option<&str> {
    present(value).filter(|v| !v.eq_ignore_ascii_case(ANY))
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(value: &str) -> Option<Timestamp> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

impl PropertyFilter {
    /// Build a filter from raw query parameters.
    ///
    /// Malformed numbers, unknown property types and unknown amenities are
    /// rejected. An unparsable `availableFrom` is ignored, and a location
    /// filter needs both `latitude` and `longitude`.
    pub fn from_params(params: &PropertySearchParams) -> Result<Self, CoreError> {
        let favorite_ids = match present(&params.favorite_ids) {
            Some(ids) => split_list(ids)
                .iter()
                .map(|id| parse_number::<DbId>("favoriteIds", id))
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let property_type = match constrained(&params.property_type) {
            Some(kind) => {
                validate_property_type(kind)?;
                Some(kind.to_string())
            }
            None => None,
        };

        let amenities = match constrained(&params.amenities) {
            Some(list) => {
                let amenities = split_list(list);
                for amenity in &amenities {
                    validate_amenity(amenity)?;
                }
                amenities
            }
            None => Vec::new(),
        };

        let near = match (present(&params.latitude), present(&params.longitude)) {
            (Some(lat), Some(lng)) => {
                let point = Coordinates::new(
                    parse_number("longitude", lng)?,
                    parse_number("latitude", lat)?,
                );
                if !point.is_valid() {
                    return Err(CoreError::Validation(format!(
                        "Coordinates out of range: {lat}, {lng}"
                    )));
                }
                Some(point)
            }
            _ => None,
        };

        Ok(Self {
            favorite_ids,
            price_min: present(&params.price_min)
                .map(|v| parse_number("priceMin", v))
                .transpose()?,
            price_max: present(&params.price_max)
                .map(|v| parse_number("priceMax", v))
                .transpose()?,
            beds_min: constrained(&params.beds)
                .map(|v| parse_number("beds", v))
                .transpose()?,
            baths_min: constrained(&params.baths)
                .map(|v| parse_number("baths", v))
                .transpose()?,
            property_type,
            square_feet_min: present(&params.square_feet_min)
                .map(|v| parse_number("squareFeetMin", v))
                .transpose()?,
            square_feet_max: present(&params.square_feet_max)
                .map(|v| parse_number("squareFeetMax", v))
                .transpose()?,
            amenities,
            available_from: constrained(&params.available_from).and_then(parse_date),
            near,
        })
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
