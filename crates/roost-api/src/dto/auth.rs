//! Authentication DTOs

use chrono::{DateTime, Utc};
use roost_db::DbUser;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub fullname: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// Sign-in with a Google identity already verified by the frontend
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct GoogleAuthRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub google_id: String,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub fullname: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyEmailRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 4, max = 8, message = "must be 4-8 digits"))]
    pub otp: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EmailRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 4, max = 8, message = "must be 4-8 digits"))]
    pub otp: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub new_password: String,
}

/// Partial profile update; omitted fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub fullname: Option<String>,
    /// Changing the phone number requires re-verification by OTP
    #[validate(length(min = 7, max = 20, message = "must be a valid phone number"))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendPhoneOtpRequest {
    #[validate(length(min = 7, max = 20, message = "must be a valid phone number"))]
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VerifyPhoneRequest {
    #[validate(length(min = 4, max = 8, message = "must be 4-8 digits"))]
    pub otp: String,
}

/// Public view of a user account
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub role: String,
    pub kyc_status: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for UserProfile {
    fn from(user: DbUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            fullname: user.fullname,
            phone: user.phone,
            email_verified: user.email_verified,
            phone_verified: user.phone_verified,
            role: user.role,
            kyc_status: user.kyc_status,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn register_validation() {
        let ok = RegisterRequest {
            email: "ada@example.com".to_string(),
            fullname: "Ada Obi".to_string(),
            password: "long enough".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..ok.clone()
        };
        assert!(bad_email.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..ok
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn profile_update_fields_are_optional_but_validated() {
        assert!(UpdateProfileRequest::default().validate().is_ok());

        let ok = UpdateProfileRequest {
            fullname: Some("Ada Obi-Eze".to_string()),
            phone: Some("+2348012345678".to_string()),
        };
        assert!(ok.validate().is_ok());

        let bad = UpdateProfileRequest {
            fullname: Some("A".to_string()),
            phone: None,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn profile_hides_secrets() {
        let value = serde_json::to_value(UserProfile {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            fullname: "Ada Obi".to_string(),
            phone: None,
            email_verified: true,
            phone_verified: false,
            role: "normal".to_string(),
            kyc_status: "UNVERIFIED".to_string(),
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("email_otp").is_none());
    }
}
