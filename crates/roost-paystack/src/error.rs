//! Gateway error types

use thiserror::Error;

/// Errors from the payment gateway client
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Transport-level failure (DNS, TLS, timeout)
    #[error("Gateway request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the gateway, with the provider's message
    #[error("Gateway rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected gateway response: {0}")]
    Malformed(String),
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;
