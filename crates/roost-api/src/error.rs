//! API error handling
//!
//! Every handler failure maps onto one of these variants, which carry
//! their HTTP status. Internal detail is logged, never returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Webhook body failed signature verification
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Forbidden")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Upstream payment gateway rejected or failed the request
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials | Self::InvalidSignature => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::InsufficientBalance => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Gateway(_) => StatusCode::BAD_GATEWAY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body returned for every error
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

impl From<roost_db::DbError> for ApiError {
    fn from(err: roost_db::DbError) -> Self {
        use roost_db::DbError;
        match err {
            DbError::NotFound(what) => {
                // repo messages are already client-safe ("Wallet not found")
                tracing::debug!(what, "Lookup missed");
                Self::NotFound(leak_static(what))
            }
            DbError::Duplicate(what) => Self::Conflict(what),
            DbError::InvalidInput(msg) => Self::Validation(msg),
            DbError::InsufficientBalance(detail) => {
                tracing::debug!(detail, "Withdrawal rejected");
                Self::InsufficientBalance
            }
            other => {
                tracing::error!(error = ?other, "Database error");
                Self::Internal
            }
        }
    }
}

/// Recover the resource name from a repo "X not found" message.
fn leak_static(message: String) -> &'static str {
    match message.as_str() {
        "Wallet not found" => "Wallet",
        "User not found" => "User",
        "Property not found" => "Property",
        "Transaction not found" => "Transaction",
        "Bank account not found" => "Bank account",
        _ => "Resource",
    }
}

impl From<roost_auth::AuthError> for ApiError {
    fn from(err: roost_auth::AuthError) -> Self {
        use roost_auth::AuthError;
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::TokenExpired | AuthError::InvalidToken | AuthError::Unauthenticated => {
                Self::Unauthorized
            }
            AuthError::InsufficientPermissions => Self::Forbidden,
            AuthError::WeakPassword(_) | AuthError::OtpMismatch | AuthError::OtpExpired => {
                Self::Validation(err.client_message())
            }
            AuthError::PasswordHashingFailed | AuthError::Internal(_) => {
                tracing::error!(error = %err, "Auth internal error");
                Self::Internal
            }
        }
    }
}

impl From<roost_paystack::GatewayError> for ApiError {
    fn from(err: roost_paystack::GatewayError) -> Self {
        use roost_paystack::GatewayError;
        match err {
            GatewayError::Api { status, message } => {
                tracing::warn!(status, message, "Gateway rejected request");
                Self::Gateway(message)
            }
            other => {
                tracing::error!(error = %other, "Gateway request failed");
                Self::Gateway("payment provider unavailable".to_string())
            }
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    format!(
                        "{}: {}",
                        field,
                        e.message.as_ref().map(|m| m.as_ref()).unwrap_or("invalid")
                    )
                })
            })
            .collect();
        Self::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidSignature.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::NotFound("Wallet").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::InsufficientBalance.status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Gateway("declined".to_string()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn db_errors_map_to_api_errors() {
        use roost_db::DbError;

        let err: ApiError = DbError::NotFound("Wallet not found".to_string()).into();
        assert!(matches!(err, ApiError::NotFound("Wallet")));

        let err: ApiError = DbError::InsufficientBalance("have 5, need 10".to_string()).into();
        assert!(matches!(err, ApiError::InsufficientBalance));

        let err: ApiError = DbError::Connection("refused".to_string()).into();
        assert!(matches!(err, ApiError::Internal));
    }

    #[test]
    fn internal_errors_hide_detail() {
        let response = ErrorResponse::from(&ApiError::Internal);
        assert_eq!(response.message, "Internal server error");
    }
}
