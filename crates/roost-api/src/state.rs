//! Application state shared across handlers

use roost_auth::AuthService;
use roost_db::Database;
use roost_paystack::PaystackClient;
use std::sync::Arc;

/// Settings the handlers need beyond the service handles
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Where funding checkout redirects back to
    pub frontend_url: String,
    /// Webhook HMAC key (the Paystack secret key)
    pub paystack_secret: String,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub paystack: Arc<PaystackClient>,
    pub settings: ApiSettings,
}

impl AppState {
    pub fn new(
        db: Arc<Database>,
        auth: Arc<AuthService>,
        paystack: Arc<PaystackClient>,
        settings: ApiSettings,
    ) -> Self {
        Self {
            db,
            auth,
            paystack,
            settings,
        }
    }
}
