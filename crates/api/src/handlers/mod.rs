pub mod application;
pub mod lease;
pub mod manager;
pub mod property;
pub mod tenant;

use rentwise_core::error::CoreError;
use serde::Serialize;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// Payload of the role dashboards: who the token says the caller is.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    pub cognito_id: String,
    pub role: String,
}

impl From<AuthUser> for DashboardUser {
    fn from(user: AuthUser) -> Self {
        Self {
            cognito_id: user.cognito_id,
            role: user.role,
        }
    }
}

/// Callers may only act on their own tenant or manager record.
pub(crate) fn ensure_self(user: &AuthUser, cognito_id: &str) -> Result<(), AppError> {
    if user.cognito_id != cognito_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Access denied: not your account".into(),
        )));
    }
    Ok(())
}
