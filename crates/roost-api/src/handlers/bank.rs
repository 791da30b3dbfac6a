//! Bank account handlers
//!
//! One linked account per user. Relinking replaces the stored details
//! and clears the gateway recipient code, which is re-created lazily on
//! the next withdrawal.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::dto::{BankAccountResponse, LinkBankAccountRequest};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthenticatedUser, ValidatedJson};
use crate::state::AppState;

/// Link or replace the user's payout bank account
#[utoipa::path(
    post,
    path = "/api/v1/bank-account",
    tag = "Bank",
    request_body = LinkBankAccountRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Account linked", body = BankAccountResponse),
        (status = 400, description = "Invalid account details"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn link_bank_account(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<LinkBankAccountRequest>,
) -> ApiResult<Json<BankAccountResponse>> {
    let account = state
        .db
        .bank_account_repo()
        .link(
            auth.user_id,
            &request.bank_code,
            &request.bank_name,
            &request.account_number,
            &request.account_name,
        )
        .await?;

    tracing::info!(user_id = %auth.user_id, bank = %account.bank_name, "Bank account linked");

    Ok(Json(account.into()))
}

/// The user's linked payout account
#[utoipa::path(
    get,
    path = "/api/v1/bank-account",
    tag = "Bank",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Linked account", body = BankAccountResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No linked account")
    )
)]
pub async fn get_bank_account(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
) -> ApiResult<Json<BankAccountResponse>> {
    let account = state
        .db
        .bank_account_repo()
        .find_by_user(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Bank account"))?;

    Ok(Json(account.into()))
}
