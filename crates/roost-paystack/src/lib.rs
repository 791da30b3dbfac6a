//! Paystack gateway integration for Roost
//!
//! Covers the three gateway operations the wallet needs (funding session
//! initialization, outbound transfers, transfer recipient creation) plus
//! webhook signature verification. Everything here speaks minor units;
//! conversion to wallet decimals happens at the ledger boundary.

pub mod client;
pub mod error;
pub mod signature;
pub mod types;

pub use client::PaystackClient;
pub use error::{GatewayError, GatewayResult};
pub use signature::{sign, verify_signature, SIGNATURE_HEADER};
pub use types::{FundingSession, RecipientRequest};

const DEFAULT_BASE_URL: &str = "https://api.paystack.co";

/// Gateway configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct PaystackConfig {
    /// Secret key (`sk_test_...` / `sk_live_...`), also the webhook HMAC key
    pub secret_key: String,
    pub base_url: String,
}

impl PaystackConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Load from `PAYSTACK_SECRET_KEY` and optional `PAYSTACK_BASE_URL`.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let secret_key = std::env::var("PAYSTACK_SECRET_KEY")?;
        let base_url =
            std::env::var("PAYSTACK_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            secret_key,
            base_url,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}
