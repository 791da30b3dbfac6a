//! One-time verification codes
//!
//! Short numeric codes delivered over email or SMS for account
//! verification and password reset. Codes are stored alongside an
//! expiry timestamp and compared in constant time.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use subtle::ConstantTimeEq;

use crate::config::OtpConfig;
use crate::error::{AuthError, AuthResult};

/// A freshly issued code with its expiry
#[derive(Debug, Clone)]
pub struct OtpCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct OtpService {
    config: OtpConfig,
}

impl OtpService {
    pub fn new(config: OtpConfig) -> Self {
        Self { config }
    }

    /// Generate a new zero-padded numeric code
    pub fn generate(&self) -> OtpCode {
        let max = 10u32.pow(self.config.digits);
        let value = rand::thread_rng().gen_range(0..max);
        let ttl = Duration::from_std(self.config.ttl).unwrap_or_else(|_| Duration::minutes(10));

        OtpCode {
            code: format!("{:0width$}", value, width = self.config.digits as usize),
            expires_at: Utc::now() + ttl,
        }
    }

    /// Check a submitted code against the stored one.
    ///
    /// Mismatch is reported before expiry so a guessed-but-stale code
    /// never reveals that a code existed.
    pub fn verify(
        &self,
        submitted: &str,
        stored: &str,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        let matches: bool = submitted.as_bytes().ct_eq(stored.as_bytes()).into();
        if !matches {
            return Err(AuthError::OtpMismatch);
        }
        if Utc::now() > expires_at {
            return Err(AuthError::OtpExpired);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> OtpService {
        OtpService::new(OtpConfig::default())
    }

    #[test]
    fn generates_codes_of_configured_width() {
        let service = service();
        for _ in 0..50 {
            let otp = service.generate();
            assert_eq!(otp.code.len(), 4);
            assert!(otp.code.chars().all(|c| c.is_ascii_digit()));
            assert!(otp.expires_at > Utc::now());
        }
    }

    #[test]
    fn verifies_matching_code() {
        let service = service();
        let otp = service.generate();
        assert!(service.verify(&otp.code, &otp.code, otp.expires_at).is_ok());
    }

    #[test]
    fn rejects_wrong_code() {
        let service = service();
        let result = service.verify("0000", "1234", Utc::now() + Duration::minutes(5));
        assert!(matches!(result, Err(AuthError::OtpMismatch)));
    }

    #[test]
    fn rejects_expired_code() {
        let service = service();
        let result = service.verify("1234", "1234", Utc::now() - Duration::seconds(1));
        assert!(matches!(result, Err(AuthError::OtpExpired)));
    }

    #[test]
    fn mismatch_wins_over_expiry() {
        let service = service();
        let result = service.verify("0000", "1234", Utc::now() - Duration::seconds(1));
        assert!(matches!(result, Err(AuthError::OtpMismatch)));
    }
}
