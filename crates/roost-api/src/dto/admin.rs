//! Admin DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Role names match [`roost_types::UserRole`] string forms
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub role: String,
}

/// Status names match [`roost_types::KycStatus`] string forms
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateKycRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub status: String,
}
