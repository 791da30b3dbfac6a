//! Route definitions
//!
//! The webhook route lives under /wallet but is unauthenticated; it is
//! protected by the HMAC signature on the payload instead of a bearer
//! token.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create API v1 routes
pub fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/wallet", wallet_routes())
        .nest("/properties", property_routes())
        .nest("/bank-account", bank_routes())
        .nest("/admin", admin_routes())
}

fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/google", post(handlers::auth::google_auth))
        .route("/verify-email", post(handlers::auth::verify_email))
        .route("/resend-otp", post(handlers::auth::resend_otp))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/reset-password", post(handlers::auth::reset_password))
        .route("/phone/send-otp", post(handlers::auth::send_phone_otp))
        .route("/phone/verify", post(handlers::auth::verify_phone))
        .route("/me", get(handlers::auth::me))
        .route("/profile", put(handlers::auth::update_profile))
        .route("/kyc/submit", post(handlers::auth::submit_kyc))
}

fn wallet_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::wallet::get_wallet))
        .route("/fund", post(handlers::wallet::fund_wallet))
        .route("/withdraw", post(handlers::wallet::withdraw))
        // Signature-authenticated, no bearer token
        .route("/webhook", post(handlers::webhook::paystack_webhook))
}

fn property_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::property::list_properties))
        .route("/", post(handlers::property::create_property))
        .route("/related/:action", get(handlers::property::related_properties))
        .route("/:id", get(handlers::property::get_property))
        .route("/:id", put(handlers::property::update_property))
        .route("/:id", delete(handlers::property::delete_property))
        .route("/:id/toggle", post(handlers::property::toggle_property))
        .route("/:id/status", get(handlers::property::property_status))
}

fn bank_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(handlers::bank::link_bank_account))
        .route("/", get(handlers::bank::get_bank_account))
}

fn admin_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(handlers::admin::list_users))
        .route("/users/:id/role", put(handlers::admin::update_user_role))
        .route("/users/:id/kyc", put(handlers::admin::update_user_kyc))
        .route("/users/:id", delete(handlers::admin::delete_user))
}

/// Create Swagger UI routes
pub fn swagger_routes() -> Router<Arc<AppState>> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
