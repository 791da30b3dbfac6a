//! Authentication error types
//!
//! Errors are safe to expose to clients; anything carrying internal
//! detail is collapsed before it leaves the API boundary.

use thiserror::Error;

/// Result type alias for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,

    /// Token is malformed or carries a bad signature
    #[error("Invalid token")]
    InvalidToken,

    /// Email/password pair did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// OTP did not match the stored code
    #[error("Invalid verification code")]
    OtpMismatch,

    /// OTP matched but its validity window has passed
    #[error("Verification code has expired")]
    OtpExpired,

    /// Password does not meet requirements
    #[error("Password does not meet requirements: {0}")]
    WeakPassword(String),

    /// Password hashing failed
    #[error("Password hashing failed")]
    PasswordHashingFailed,

    /// No credentials on a route that requires them
    #[error("Authentication required")]
    Unauthenticated,

    /// Authenticated but the role does not allow this operation
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Internal error, never exposed verbatim to clients
    #[error("Internal error")]
    Internal(String),
}

impl AuthError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::WeakPassword(_) | Self::OtpMismatch | Self::OtpExpired => 400,
            Self::TokenExpired
            | Self::InvalidToken
            | Self::InvalidCredentials
            | Self::Unauthenticated => 401,
            Self::InsufficientPermissions => 403,
            Self::PasswordHashingFailed | Self::Internal(_) => 500,
        }
    }

    /// Message safe to send to a client
    pub fn client_message(&self) -> String {
        match self {
            Self::PasswordHashingFailed | Self::Internal(_) => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        match err.kind() {
            ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::InsufficientPermissions.status_code(), 403);
        assert_eq!(AuthError::OtpMismatch.status_code(), 400);
        assert_eq!(AuthError::Internal("x".to_string()).status_code(), 500);
    }

    #[test]
    fn internal_detail_is_not_exposed() {
        let err = AuthError::Internal("postgres://user:hunter2@db".to_string());
        assert!(!err.client_message().contains("hunter2"));
    }
}
