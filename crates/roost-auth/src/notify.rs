//! Outbound verification delivery
//!
//! Seam for sending OTPs and password-reset codes. The default
//! implementation logs instead of sending, which is what development
//! and test environments run with; production wires in a real
//! provider behind the same trait.

use async_trait::async_trait;
use tracing::info;

use crate::error::AuthResult;

/// Delivery channel for verification codes
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_email_otp(&self, email: &str, code: &str) -> AuthResult<()>;

    async fn send_sms_otp(&self, phone: &str, code: &str) -> AuthResult<()>;

    async fn send_password_reset(&self, email: &str, code: &str) -> AuthResult<()>;
}

/// Logs deliveries instead of sending them
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn send_email_otp(&self, email: &str, code: &str) -> AuthResult<()> {
        info!(email, code, "Email OTP (tracing notifier)");
        Ok(())
    }

    async fn send_sms_otp(&self, phone: &str, code: &str) -> AuthResult<()> {
        info!(phone, code, "SMS OTP (tracing notifier)");
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, code: &str) -> AuthResult<()> {
        info!(email, code, "Password reset code (tracing notifier)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn tracing_notifier_always_succeeds() {
        let notifier = TracingNotifier;
        assert!(notifier.send_email_otp("a@example.com", "1234").await.is_ok());
        assert!(notifier.send_sms_otp("+2348012345678", "1234").await.is_ok());
        assert!(notifier
            .send_password_reset("a@example.com", "1234")
            .await
            .is_ok());
    }
}
