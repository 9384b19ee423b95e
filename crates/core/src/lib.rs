//! Domain building blocks shared by the database, cloud and API crates.
//!
//! Nothing in here touches the network or the database; everything is
//! plain data and pure functions so it can be unit tested in isolation.

pub mod error;
pub mod geo;
pub mod lease_terms;
pub mod listing;
pub mod photos;
pub mod roles;
pub mod search;
pub mod types;
pub mod validation;
