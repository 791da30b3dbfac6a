//! Paystack HTTP client
//!
//! Thin, synchronous-per-request client over the Paystack REST API. Calls
//! are awaited within the caller's request lifetime and bounded by the
//! reqwest client timeout; failures surface as [`GatewayError`] and are
//! never retried here - for funding, the webhook redelivery loop is the
//! retry driver.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{GatewayError, GatewayResult};
use crate::types::{
    Envelope, FundingSession, InitializeRequest, RecipientData, RecipientRequest, TransferRequest,
};
use crate::PaystackConfig;

pub struct PaystackClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl PaystackClient {
    pub fn new(config: &PaystackConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    /// Start a checkout session for wallet funding.
    ///
    /// The caller must have recorded the PENDING ledger row before calling,
    /// so a crash after this call still leaves a reconcilable record.
    pub async fn initialize_funding(
        &self,
        email: &str,
        amount_minor: i64,
        reference: &str,
        callback_url: &str,
    ) -> GatewayResult<FundingSession> {
        let request = InitializeRequest {
            email: email.to_string(),
            amount: amount_minor,
            reference: reference.to_string(),
            callback_url: callback_url.to_string(),
        };

        debug!(reference, amount_minor, "Initializing funding session");
        self.post("/transaction/initialize", &request).await
    }

    /// Start an outbound transfer for a withdrawal.
    ///
    /// Synchronous in the gateway sense only: the transfer is accepted here
    /// and resolved later by a `transfer.*` webhook, so the withdrawal's
    /// ledger row stays PENDING after this returns.
    pub async fn initiate_transfer(
        &self,
        recipient_code: &str,
        amount_minor: i64,
        reference: &str,
        reason: &str,
    ) -> GatewayResult<serde_json::Value> {
        let request = TransferRequest {
            source: "balance",
            amount: amount_minor,
            recipient: recipient_code.to_string(),
            reason: reason.to_string(),
            reference: reference.to_string(),
        };

        debug!(reference, amount_minor, "Initiating transfer");
        self.post("/transfer", &request).await
    }

    /// Create a transfer recipient for a bank account and return its code.
    ///
    /// Callers keep this idempotent by checking the stored recipient code
    /// first and only calling when none exists.
    pub async fn create_recipient(&self, request: &RecipientRequest) -> GatewayResult<String> {
        let data: RecipientData = self.post("/transferrecipient", request).await?;
        Ok(data.recipient_code)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = extract_message(response, status).await;
            warn!(%status, path, "Gateway rejected request: {}", message);
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<T> = response.json().await?;
        envelope
            .data
            .ok_or_else(|| GatewayError::Malformed(envelope.message))
    }
}

/// Pull the provider's message out of an error body, falling back to the
/// HTTP status line when the body is not the expected JSON.
async fn extract_message(response: reqwest::Response, status: StatusCode) -> String {
    match response.json::<Envelope<serde_json::Value>>().await {
        Ok(envelope) if !envelope.message.is_empty() => envelope.message,
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    }
}
