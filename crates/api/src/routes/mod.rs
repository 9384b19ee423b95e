pub mod application;
pub mod health;
pub mod lease;
pub mod manager;
pub mod property;
pub mod tenant;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tenants                                          dashboard, create (tenant)
/// /tenants/{cognito_id}                             get, update
/// /tenants/{cognito_id}/current-residences          list residences
/// /tenants/{cognito_id}/favorites/{property_id}     add, remove
///
/// /managers                                         dashboard, create (manager)
/// /managers/{cognito_id}                            get, update
/// /managers/{cognito_id}/properties                 list managed properties
///
/// /properties                                       search (public), create (manager)
/// /properties/{id}                                  get (public), update, delete (manager)
///
/// /applications                                     list (auth), create (tenant)
/// /applications/{id}/status                         update status (manager)
///
/// /leases                                           list (auth)
/// /leases/{id}/payments                             list payments (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tenants", tenant::router())
        .nest("/managers", manager::router())
        .nest("/properties", property::router())
        .nest("/applications", application::router())
        .nest("/leases", lease::router())
}
