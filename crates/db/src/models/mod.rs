//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - Composite "detail" structs returned by the API with related rows nested
//!
//! Everything serializes with camelCase keys, the dashboard's convention.

pub mod application;
pub mod enums;
pub mod lease;
pub mod location;
pub mod manager;
pub mod payment;
pub mod property;
pub mod tenant;
