//! Password hashing with Argon2id

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};

use crate::config::PasswordConfig;
use crate::error::{AuthError, AuthResult};

#[derive(Clone)]
pub struct PasswordService {
    config: PasswordConfig,
}

impl PasswordService {
    pub fn new(config: PasswordConfig) -> Self {
        Self { config }
    }

    /// Hash a password, validating length bounds first
    pub fn hash_password(&self, password: &str) -> AuthResult<String> {
        self.validate(password)?;

        let salt = SaltString::generate(&mut OsRng);
        let params = Params::new(
            self.config.memory_cost,
            self.config.time_cost,
            self.config.parallelism,
            None,
        )
        .map_err(|e| AuthError::Internal(format!("Invalid Argon2 params: {}", e)))?;

        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);
        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordHashingFailed)?;

        Ok(hash.to_string())
    }

    /// Verify a password against a stored hash
    pub fn verify_password(&self, password: &str, hash: &str) -> AuthResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(_) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(_) => Err(AuthError::InvalidCredentials),
        }
    }

    fn validate(&self, password: &str) -> AuthResult<()> {
        if password.len() < self.config.min_password_length {
            return Err(AuthError::WeakPassword(format!(
                "must be at least {} characters",
                self.config.min_password_length
            )));
        }
        if password.len() > self.config.max_password_length {
            return Err(AuthError::WeakPassword(format!(
                "must be at most {} characters",
                self.config.max_password_length
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> PasswordConfig {
        PasswordConfig {
            // low cost so tests stay fast
            memory_cost: 4096,
            time_cost: 1,
            parallelism: 1,
            min_password_length: 8,
            max_password_length: 128,
        }
    }

    #[test]
    fn hash_and_verify() {
        let service = PasswordService::new(test_config());
        let hash = service.hash_password("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify_password("correct horse battery", &hash).unwrap());
        assert!(!service.verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn rejects_short_passwords() {
        let service = PasswordService::new(test_config());
        assert!(matches!(
            service.hash_password("short"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn same_password_different_salts() {
        let service = PasswordService::new(test_config());
        let h1 = service.hash_password("correct horse battery").unwrap();
        let h2 = service.hash_password("correct horse battery").unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn garbage_hash_is_invalid_credentials() {
        let service = PasswordService::new(test_config());
        assert!(matches!(
            service.verify_password("anything", "not-a-hash"),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
