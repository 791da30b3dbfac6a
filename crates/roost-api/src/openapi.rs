//! OpenAPI documentation

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// Roost API documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roost API",
        description = "REST API for the Roost property marketplace: accounts, NGN wallet, Paystack funding and withdrawals, property listings.",
        version = "1.0.0"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    paths(
        // Health
        handlers::health::health_check,
        handlers::health::readiness_check,
        // Auth
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::google_auth,
        handlers::auth::verify_email,
        handlers::auth::resend_otp,
        handlers::auth::forgot_password,
        handlers::auth::reset_password,
        handlers::auth::send_phone_otp,
        handlers::auth::verify_phone,
        handlers::auth::me,
        handlers::auth::update_profile,
        handlers::auth::submit_kyc,
        // Wallet
        handlers::wallet::get_wallet,
        handlers::wallet::fund_wallet,
        handlers::wallet::withdraw,
        handlers::webhook::paystack_webhook,
        // Properties
        handlers::property::list_properties,
        handlers::property::get_property,
        handlers::property::create_property,
        handlers::property::update_property,
        handlers::property::delete_property,
        handlers::property::toggle_property,
        handlers::property::property_status,
        handlers::property::related_properties,
        // Bank
        handlers::bank::link_bank_account,
        handlers::bank::get_bank_account,
        // Admin
        handlers::admin::list_users,
        handlers::admin::update_user_role,
        handlers::admin::update_user_kyc,
        handlers::admin::delete_user,
    ),
    components(
        schemas(
            ErrorResponse,
            dto::MessageResponse,
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            // Auth
            dto::RegisterRequest,
            dto::LoginRequest,
            dto::GoogleAuthRequest,
            dto::VerifyEmailRequest,
            dto::EmailRequest,
            dto::ResetPasswordRequest,
            dto::UpdateProfileRequest,
            dto::SendPhoneOtpRequest,
            dto::VerifyPhoneRequest,
            dto::UserProfile,
            dto::AuthResponse,
            // Wallet
            dto::FundRequest,
            dto::FundResponse,
            dto::WithdrawRequest,
            dto::WithdrawResponse,
            dto::TransactionView,
            dto::WalletResponse,
            // Bank
            dto::LinkBankAccountRequest,
            dto::BankAccountResponse,
            // Properties
            dto::CreatePropertyRequest,
            dto::UpdatePropertyRequest,
            dto::ToggleRequest,
            dto::ToggleResponse,
            dto::PropertyView,
            dto::UserStatusView,
            // Admin
            dto::UpdateRoleRequest,
            dto::UpdateKycRequest,
        )
    ),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Auth", description = "Registration, sign-in and verification"),
        (name = "Wallet", description = "Wallet balance, funding and withdrawals"),
        (name = "Properties", description = "Property listings and per-user relations"),
        (name = "Bank", description = "Payout bank account"),
        (name = "Admin", description = "User administration")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Registers the bearer JWT scheme referenced by handler annotations
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Roost API");
    }

    #[test]
    fn webhook_path_is_documented() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("/api/v1/wallet/webhook"));
    }
}
