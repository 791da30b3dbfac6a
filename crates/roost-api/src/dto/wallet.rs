//! Wallet and transaction DTOs
//!
//! Amounts cross the API in naira (major units); conversion to kobo
//! happens only at the gateway boundary.

use chrono::{DateTime, Utc};
use roost_db::{DbTransaction, DbWallet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FundRequest {
    /// Amount in naira
    pub amount: Decimal,
    /// Checkout receipt email; defaults to the account email
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FundResponse {
    /// Checkout URL to redirect the client to
    pub authorization_url: String,
    pub reference: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WithdrawRequest {
    /// Amount in naira
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WithdrawResponse {
    pub transaction: TransactionView,
    /// Raw gateway response for the initiated transfer
    pub paystack_data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TransactionView {
    pub id: Uuid,
    pub tx_type: String,
    pub amount: Decimal,
    pub reference: String,
    pub status: String,
    /// Gateway-side id of the charge or transfer
    pub paystack_ref: Option<String>,
    pub channel: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<DbTransaction> for TransactionView {
    fn from(tx: DbTransaction) -> Self {
        Self {
            id: tx.id,
            tx_type: tx.tx_type,
            amount: tx.amount,
            reference: tx.reference,
            status: tx.status,
            paystack_ref: tx.paystack_ref,
            channel: tx.channel,
            metadata: tx.metadata,
            created_at: tx.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: Decimal,
    pub currency: String,
    pub transactions: Vec<TransactionView>,
}

impl WalletResponse {
    pub fn new(wallet: DbWallet, transactions: Vec<DbTransaction>) -> Self {
        Self {
            id: wallet.id,
            user_id: wallet.user_id,
            balance: wallet.balance,
            currency: wallet.currency,
            transactions: transactions.into_iter().map(TransactionView::from).collect(),
        }
    }
}
