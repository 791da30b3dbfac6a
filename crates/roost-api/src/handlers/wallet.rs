//! Wallet handlers
//!
//! Funding and withdrawal both record a PENDING ledger row before the
//! gateway is contacted, so every gateway-side event maps back to a
//! known reference. Withdrawals debit eagerly and are refunded by the
//! reconciliation path if the transfer fails.

use axum::{extract::State, Json};
use chrono::Utc;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use roost_paystack::RecipientRequest;
use roost_types::ledger::TransactionType;
use roost_types::webhook::EventKind;
use roost_types::{DEFAULT_CURRENCY, MIN_FUNDING_AMOUNT};

use crate::dto::{FundRequest, FundResponse, WalletResponse, WithdrawRequest, WithdrawResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::{AuthenticatedUser, ValidatedJson};
use crate::state::AppState;

/// The requesting user's wallet with its transaction history
#[utoipa::path(
    get,
    path = "/api/v1/wallet",
    tag = "Wallet",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Wallet with transactions", body = WalletResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
) -> ApiResult<Json<WalletResponse>> {
    let wallet = state
        .db
        .wallet_repo()
        .find_by_user(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Wallet"))?;

    let transactions = state.db.ledger_repo().list_by_wallet(wallet.id).await?;

    Ok(Json(WalletResponse::new(wallet, transactions)))
}

/// Start a funding checkout session
#[utoipa::path(
    post,
    path = "/api/v1/wallet/fund",
    tag = "Wallet",
    request_body = FundRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Checkout session created", body = FundResponse),
        (status = 400, description = "Amount below minimum"),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Gateway unavailable")
    )
)]
pub async fn fund_wallet(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<FundRequest>,
) -> ApiResult<Json<FundResponse>> {
    if request.amount < Decimal::from(MIN_FUNDING_AMOUNT) {
        return Err(ApiError::Validation(format!(
            "minimum funding amount is {} {}",
            MIN_FUNDING_AMOUNT, DEFAULT_CURRENCY
        )));
    }
    let amount_minor = to_minor_units(request.amount)?;

    let wallet = state
        .db
        .wallet_repo()
        .find_by_user(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Wallet"))?;

    let email = request.email.as_deref().unwrap_or(&auth.email);
    let reference = format!("FUND_{}_{}", Utc::now().timestamp_millis(), auth.user_id);

    // Record before contacting the gateway so a crash between the two
    // steps leaves a reconcilable PENDING row, never an orphan charge.
    state
        .db
        .ledger_repo()
        .create_pending(wallet.id, TransactionType::Fund, request.amount, &reference)
        .await?;

    let callback_url = format!("{}/wallet/verify", state.settings.frontend_url);
    let session = state
        .paystack
        .initialize_funding(email, amount_minor, &reference, &callback_url)
        .await?;

    tracing::info!(
        user_id = %auth.user_id,
        reference = %reference,
        amount = %request.amount,
        "Funding session created"
    );

    Ok(Json(FundResponse {
        authorization_url: session.authorization_url,
        reference: session.reference,
    }))
}

/// Withdraw to the linked bank account
#[utoipa::path(
    post,
    path = "/api/v1/wallet/withdraw",
    tag = "Wallet",
    request_body = WithdrawRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Withdrawal initiated", body = WithdrawResponse),
        (status = 400, description = "Invalid amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No linked bank account"),
        (status = 422, description = "Insufficient balance"),
        (status = 502, description = "Gateway unavailable")
    )
)]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    AuthenticatedUser(auth): AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<WithdrawRequest>,
) -> ApiResult<Json<WithdrawResponse>> {
    if request.amount <= Decimal::ZERO {
        return Err(ApiError::Validation("amount must be positive".to_string()));
    }
    let amount_minor = to_minor_units(request.amount)?;

    let wallet = state
        .db
        .wallet_repo()
        .find_by_user(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Wallet"))?;

    let bank_account = state
        .db
        .bank_account_repo()
        .find_by_user(auth.user_id)
        .await?
        .ok_or(ApiError::NotFound("Bank account"))?;

    let reference = Uuid::new_v4().to_string();

    // Eager debit: balance moves now, refunded if the transfer fails.
    let transaction = state
        .db
        .ledger_repo()
        .initiate_withdrawal(wallet.id, request.amount, &reference)
        .await?;

    let recipient_code = match bank_account.recipient_code {
        Some(code) => code,
        None => {
            let recipient = RecipientRequest {
                recipient_type: "nuban",
                name: bank_account.account_name.clone(),
                account_number: bank_account.account_number.clone(),
                bank_code: bank_account.bank_code.clone(),
                currency: DEFAULT_CURRENCY.to_string(),
            };
            match state.paystack.create_recipient(&recipient).await {
                Ok(code) => {
                    state
                        .db
                        .bank_account_repo()
                        .set_recipient_code(auth.user_id, &code)
                        .await?;
                    code
                }
                Err(err) => {
                    refund_failed_withdrawal(&state, &reference, request.amount, "recipient")
                        .await?;
                    return Err(err.into());
                }
            }
        }
    };

    let paystack_data = match state
        .paystack
        .initiate_transfer(&recipient_code, amount_minor, &reference, "Wallet withdrawal")
        .await
    {
        Ok(data) => data,
        Err(err) => {
            refund_failed_withdrawal(&state, &reference, request.amount, "transfer").await?;
            return Err(err.into());
        }
    };

    tracing::info!(
        user_id = %auth.user_id,
        reference = %reference,
        amount = %request.amount,
        "Withdrawal initiated"
    );

    Ok(Json(WithdrawResponse {
        transaction: transaction.into(),
        paystack_data,
    }))
}

/// Undo an eager debit after a synchronous gateway failure. Runs
/// through the same reconciliation path a `transfer.failed` webhook
/// would, so the refund-and-fail transition stays in one place.
async fn refund_failed_withdrawal(
    state: &AppState,
    reference: &str,
    amount: Decimal,
    stage: &str,
) -> ApiResult<()> {
    let metadata = serde_json::json!({ "failed_stage": stage });
    state
        .db
        .ledger_repo()
        .apply_event(
            EventKind::TransferFailed,
            reference,
            amount,
            None,
            None,
            &metadata,
        )
        .await?;

    tracing::warn!(reference, stage, "Withdrawal refunded after gateway failure");
    Ok(())
}

/// Convert a naira amount to kobo, rejecting sub-kobo precision.
fn to_minor_units(amount: Decimal) -> Result<i64, ApiError> {
    // checked: Decimal's Mul panics on overflow near Decimal::MAX
    let minor = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| ApiError::Validation("amount out of range".to_string()))?;
    if !minor.fract().is_zero() {
        return Err(ApiError::Validation(
            "amount has more than 2 decimal places".to_string(),
        ));
    }
    minor
        .to_i64()
        .ok_or_else(|| ApiError::Validation("amount out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn naira_to_kobo() {
        assert_eq!(to_minor_units(dec!(500)).unwrap(), 50_000);
        assert_eq!(to_minor_units(dec!(1234.56)).unwrap(), 123_456);
        assert_eq!(to_minor_units(dec!(0.01)).unwrap(), 1);
    }

    #[test]
    fn sub_kobo_precision_is_rejected() {
        assert!(to_minor_units(dec!(10.001)).is_err());
    }

    #[test]
    fn oversized_amounts_are_rejected_not_panicked() {
        let huge: Decimal = "1000000000000000000000000000".parse().unwrap();
        assert!(matches!(to_minor_units(huge), Err(ApiError::Validation(_))));
        assert!(matches!(
            to_minor_units(Decimal::MAX),
            Err(ApiError::Validation(_))
        ));
    }
}
