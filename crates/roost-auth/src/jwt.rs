//! JWT token service
//!
//! Single access token per login. There is no refresh flow; clients
//! re-authenticate when the token expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use roost_types::user::UserRole;
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::{AuthError, AuthResult};
use crate::types::{AuthenticatedUser, TokenClaims};

#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access token for a user
    pub fn generate_token(&self, user_id: Uuid, email: &str, role: UserRole) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now
            + Duration::from_std(self.config.token_lifetime)
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to encode token: {}", e)))
    }

    /// Validate a token and return its claims
    pub fn validate_token(&self, token: &str) -> AuthResult<TokenClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_exp = true;

        let data = decode::<TokenClaims>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }

    /// Validate a token and resolve the request identity
    pub fn authenticate(&self, token: &str) -> AuthResult<AuthenticatedUser> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration as StdDuration;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-for-jwt-tokens-min-32-bytes!".to_string(),
            token_lifetime: StdDuration::from_secs(3600),
            issuer: "roost-test".to_string(),
        }
    }

    #[test]
    fn generate_and_validate() {
        let service = JwtService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service
            .generate_token(user_id, "ada@example.com", UserRole::Normal)
            .unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "ada@example.com");
        assert_eq!(claims.role, UserRole::Normal);
        assert_eq!(claims.iss, "roost-test");
    }

    #[test]
    fn authenticate_resolves_identity() {
        let service = JwtService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service
            .generate_token(user_id, "admin@example.com", UserRole::Admin)
            .unwrap();
        let user = service.authenticate(&token).unwrap();

        assert_eq!(user.user_id, user_id);
        assert!(user.is_admin());
    }

    #[test]
    fn rejects_garbage_tokens() {
        let service = JwtService::new(test_config());
        assert!(matches!(
            service.validate_token("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn rejects_tokens_from_another_secret() {
        let service = JwtService::new(test_config());
        let mut other_config = test_config();
        other_config.secret = "another-secret-key-also-32-bytes-long!!".to_string();
        let other = JwtService::new(other_config);

        let token = other
            .generate_token(Uuid::new_v4(), "x@example.com", UserRole::Normal)
            .unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn rejects_expired_tokens() {
        let service = JwtService::new(test_config());

        // exp well past the default 60s validation leeway
        let now = Utc::now();
        let claims = TokenClaims {
            sub: Uuid::new_v4().to_string(),
            email: "x@example.com".to_string(),
            role: UserRole::Normal,
            iat: (now - Duration::seconds(300)).timestamp(),
            exp: (now - Duration::seconds(120)).timestamp(),
            iss: "roost-test".to_string(),
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(test_config().secret.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }
}
