use std::sync::Arc;

use rentwise_cloud::{Geocoder, PhotoStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: rentwise_db::DbPool,
    /// Server configuration (token validation reads it on every request).
    pub config: Arc<ServerConfig>,
    /// Where property photos are uploaded.
    pub photo_store: Arc<dyn PhotoStore>,
    /// Address to coordinates lookup for new listings.
    pub geocoder: Arc<dyn Geocoder>,
}
