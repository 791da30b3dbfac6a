//! Payout bank account DTOs

use chrono::{DateTime, Utc};
use roost_db::DbBankAccount;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LinkBankAccountRequest {
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub bank_name: String,
    /// CBN bank code, e.g. "058" for GTBank
    #[validate(length(min = 3, max = 6, message = "must be 3-6 characters"))]
    pub bank_code: String,
    /// NUBAN account number
    #[validate(length(equal = 10, message = "must be 10 digits"))]
    pub account_number: String,
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    pub account_name: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BankAccountResponse {
    pub id: Uuid,
    pub bank_name: String,
    pub bank_code: String,
    pub account_number: String,
    pub account_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<DbBankAccount> for BankAccountResponse {
    fn from(account: DbBankAccount) -> Self {
        Self {
            id: account.id,
            bank_name: account.bank_name,
            bank_code: account.bank_code,
            account_number: account.account_number,
            account_name: account.account_name,
            created_at: account.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_number_must_be_ten_digits() {
        let base = LinkBankAccountRequest {
            bank_name: "GTBank".to_string(),
            bank_code: "058".to_string(),
            account_number: "0001234567".to_string(),
            account_name: "Ada Obi".to_string(),
        };
        assert!(base.validate().is_ok());

        let short = LinkBankAccountRequest {
            account_number: "12345".to_string(),
            ..base
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn response_omits_recipient_code() {
        let value = serde_json::to_value(BankAccountResponse {
            id: Uuid::new_v4(),
            bank_name: "GTBank".to_string(),
            bank_code: "058".to_string(),
            account_number: "0001234567".to_string(),
            account_name: "Ada Obi".to_string(),
            created_at: Utc::now(),
        })
        .unwrap();
        assert!(value.get("recipient_code").is_none());
    }
}
