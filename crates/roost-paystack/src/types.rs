//! Gateway request/response shapes
//!
//! All amounts cross the wire in minor units (kobo).

use serde::{Deserialize, Serialize};

/// Envelope every Paystack response uses
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitializeRequest {
    pub email: String,
    pub amount: i64,
    pub reference: String,
    pub callback_url: String,
}

/// A funding session handed back to the client for checkout redirection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FundingSession {
    pub authorization_url: String,
    #[serde(default)]
    pub access_code: Option<String>,
    pub reference: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransferRequest {
    /// Always "balance" - transfers draw from the integration balance
    pub source: &'static str,
    pub amount: i64,
    pub recipient: String,
    pub reason: String,
    pub reference: String,
}

/// Payout destination details for recipient creation
#[derive(Debug, Clone, Serialize)]
pub struct RecipientRequest {
    /// Nigerian bank account recipients are type "nuban"
    #[serde(rename = "type")]
    pub recipient_type: &'static str,
    pub name: String,
    pub account_number: String,
    pub bank_code: String,
    pub currency: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecipientData {
    pub recipient_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_request_serializes_minor_units() {
        let req = InitializeRequest {
            email: "buyer@example.com".to_string(),
            amount: 100_000,
            reference: "FUND_1700000000_42".to_string(),
            callback_url: "https://app.example.com/wallet/verify".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["amount"], 100_000);
        assert_eq!(value["reference"], "FUND_1700000000_42");
    }

    #[test]
    fn recipient_request_uses_type_field_name() {
        let req = RecipientRequest {
            recipient_type: "nuban",
            name: "Ada Obi".to_string(),
            account_number: "0001234567".to_string(),
            bank_code: "058".to_string(),
            currency: "NGN".to_string(),
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["type"], "nuban");
        assert!(value.get("recipient_type").is_none());
    }

    #[test]
    fn envelope_tolerates_missing_data() {
        let envelope: Envelope<FundingSession> =
            serde_json::from_str(r#"{"status":false,"message":"Invalid key"}"#).unwrap();
        assert!(!envelope.status);
        assert!(envelope.data.is_none());
    }
}
