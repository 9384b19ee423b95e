//! Property listing vocabulary and form-value parsing.
//!
//! The name lists mirror the Postgres enum types created in the migrations;
//! the database crate maps them onto Rust enums.

use std::str::FromStr;

use crate::error::CoreError;

pub const PROPERTY_TYPES: &[&str] = &[
    "Rooms",
    "Tinyhouse",
    "Apartment",
    "Villa",
    "Townhouse",
    "Cottage",
];

pub const AMENITIES: &[&str] = &[
    "WasherDryer",
    "AirConditioning",
    "Dishwasher",
    "HighSpeedInternet",
    "HardwoodFloors",
    "WalkInClosets",
    "Microwave",
    "Refrigerator",
    "Pool",
    "Gym",
    "Parking",
    "PetsAllowed",
    "WiFi",
];

pub const HIGHLIGHTS: &[&str] = &[
    "HighSpeedInternetAccess",
    "WasherDryer",
    "AirConditioning",
    "Heating",
    "SmokeFree",
    "CableReady",
    "SatelliteTV",
    "DoubleVanities",
    "TubShower",
    "Intercom",
    "SprinklerSystem",
    "RecentlyRenovated",
    "CloseToTransit",
    "GreatView",
    "QuietNeighborhood",
];

/// Sentinel used by the dashboard filters for "no constraint".
pub const ANY: &str = "any";

fn validate_member(kind: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {kind} '{value}'. Must be one of: {allowed:?}"
        )))
    }
}

pub fn validate_property_type(value: &str) -> Result<(), CoreError> {
    validate_member("property type", value, PROPERTY_TYPES)
}

pub fn validate_amenity(value: &str) -> Result<(), CoreError> {
    validate_member("amenity", value, AMENITIES)
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Numeric types accepted in form and query values.
pub trait FormNumber: FromStr {
    /// Integers are always finite; floats must not be NaN or infinite.
    fn is_finite_number(&self) -> bool {
        true
    }
}

impl FormNumber for f64 {
    fn is_finite_number(&self) -> bool {
        self.is_finite()
    }
}

impl FormNumber for i32 {}
impl FormNumber for i64 {}

/// Parse a numeric form or query value, naming the field on failure.
///
/// `NaN` and `inf` parse as floats but are rejected here.
pub fn parse_number<T: FormNumber>(field: &str, value: &str) -> Result<T, CoreError> {
    value
        .trim()
        .parse::<T>()
        .ok()
        .filter(FormNumber::is_finite_number)
        .ok_or_else(|| CoreError::Validation(format!("{field} must be a number, got '{value}'")))
}

/// Parse a boolean form value (`true` / `false`, case-insensitive).
pub fn parse_flag(field: &str, value: &str) -> Result<bool, CoreError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CoreError::Validation(format!(
            "{field} must be true or false, got '{value}'"
        ))),
    }
}
