//! Database models - mapped from PostgreSQL tables

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbUser {
    pub id: Uuid,
    pub email: String,
    pub fullname: String,
    /// Absent for accounts created through Google sign-in only
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub email_verified: bool,
    pub phone: Option<String>,
    pub phone_verified: bool,
    pub email_otp: Option<String>,
    pub phone_otp: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub role: String,
    pub kyc_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Wallet / Ledger Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbWallet {
    pub id: Uuid,
    pub user_id: Uuid,
    pub balance: Decimal,
    pub currency: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbTransaction {
    pub id: Uuid,
    pub wallet_id: Uuid,
    pub tx_type: String,
    pub amount: Decimal,
    /// Globally unique; correlates this row with gateway operations
    pub reference: String,
    pub status: String,
    /// Gateway-side id of the charge or transfer
    pub paystack_ref: Option<String>,
    pub channel: Option<String>,
    /// Raw gateway event payload recorded at settlement time
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBankAccount {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bank_code: String,
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,
    /// Filled lazily when the first withdrawal creates a gateway recipient
    pub recipient_code: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Property Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbProperty {
    pub id: Uuid,
    pub seller_id: Uuid,
    pub title: String,
    pub image_src: String,
    /// Gallery image URLs
    pub views: Vec<String>,
    pub bedrooms: String,
    pub rating: f64,
    pub sf: String,
    pub reviews: i32,
    pub price: String,
    pub location: String,
    pub overview: serde_json::Value,
    pub about: Vec<String>,
    pub sale_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row in one of the per-user property relation tables
/// (bought, wishlist, invested, rented)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbPropertyLink {
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Per-user relation flags attached to a property listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyUserStatus {
    pub is_bought: bool,
    pub is_wishlisted: bool,
    pub is_invested: bool,
    pub is_rented: bool,
}
