//! Authentication configuration

use std::time::Duration;

/// Top-level authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
    pub otp: OtpConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            password: PasswordConfig::default(),
            otp: OtpConfig::default(),
        }
    }
}

/// JWT signing configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC secret, at least 32 bytes in production
    pub secret: String,
    pub token_lifetime: Duration,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(), // must be set in production
            token_lifetime: Duration::from_secs(7 * 24 * 60 * 60),
            issuer: "roost".to_string(),
        }
    }
}

/// Argon2id parameters, OWASP baseline
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub memory_cost: u32,
    pub time_cost: u32,
    pub parallelism: u32,
    pub min_password_length: usize,
    pub max_password_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
            min_password_length: 8,
            max_password_length: 128,
        }
    }
}

/// One-time verification code configuration
#[derive(Debug, Clone)]
pub struct OtpConfig {
    /// Number of digits in the code
    pub digits: u32,
    /// How long a code stays valid after issue
    pub ttl: Duration,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            digits: 4,
            ttl: Duration::from_secs(10 * 60),
        }
    }
}

impl AuthConfig {
    /// Load overrides from environment variables
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let mut config = Self::default();
        config.jwt.secret = std::env::var("JWT_SECRET")?;
        if let Ok(issuer) = std::env::var("JWT_ISSUER") {
            config.jwt.issuer = issuer;
        }
        if let Ok(hours) = std::env::var("JWT_LIFETIME_HOURS") {
            if let Ok(hours) = hours.parse::<u64>() {
                config.jwt.token_lifetime = Duration::from_secs(hours * 60 * 60);
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.jwt.secret.is_empty() {
            errors.push("JWT secret must be set".to_string());
        } else if self.jwt.secret.len() < 32 {
            errors.push("JWT secret should be at least 32 bytes".to_string());
        }
        if self.otp.digits < 4 {
            errors.push("OTP must be at least 4 digits".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.otp.digits, 4);
        assert_eq!(config.otp.ttl, Duration::from_secs(600));
        assert_eq!(config.password.memory_cost, 19456);
    }

    #[test]
    fn validation_requires_secret() {
        let config = AuthConfig::default();
        assert!(config.validate().is_err());

        let mut config = AuthConfig::default();
        config.jwt.secret = "a".repeat(32);
        assert!(config.validate().is_ok());
    }
}
