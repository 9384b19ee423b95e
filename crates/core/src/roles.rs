//! Role names carried in the identity provider's `custom:role` claim.

pub const ROLE_TENANT: &str = "tenant";
pub const ROLE_MANAGER: &str = "manager";
