//! Roost authentication layer
//!
//! - JWT access tokens (single token, no refresh flow)
//! - Argon2id password hashing
//! - Numeric OTPs for email/phone verification and password reset
//! - Axum middleware attaching [`AuthenticatedUser`] to requests

pub mod config;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod notify;
pub mod otp;
pub mod password;
pub mod types;

pub use config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use jwt::JwtService;
pub use middleware::AuthLayer;
pub use notify::{Notifier, TracingNotifier};
pub use otp::{OtpCode, OtpService};
pub use password::PasswordService;
pub use types::{AuthenticatedUser, TokenClaims};

use std::sync::Arc;

/// Bundle of authentication services shared across handlers
#[derive(Clone)]
pub struct AuthService {
    pub jwt: JwtService,
    pub password: PasswordService,
    pub otp: OtpService,
    pub notifier: Arc<dyn Notifier>,
}

impl AuthService {
    pub fn new(config: AuthConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            jwt: JwtService::new(config.jwt),
            password: PasswordService::new(config.password),
            otp: OtpService::new(config.otp),
            notifier,
        }
    }

    /// Construct with the logging notifier, for development and tests
    pub fn with_tracing_notifier(config: AuthConfig) -> Self {
        Self::new(config, Arc::new(TracingNotifier))
    }

    /// Auth layer for the Axum router
    pub fn layer(&self) -> AuthLayer {
        AuthLayer::new(Arc::new(self.jwt.clone()))
    }
}
