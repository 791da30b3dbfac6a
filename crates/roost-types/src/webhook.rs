//! Payment gateway webhook events
//!
//! Paystack delivers events as `{"event": "...", "data": {...}}` with
//! amounts in minor units (kobo). The `data` payload shape varies per event
//! type, so it is kept as raw JSON and fields are pulled out by accessors;
//! the raw payload is also what gets persisted as transaction metadata.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Recognized gateway event kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A funding charge completed
    ChargeSuccess,
    /// An outbound transfer completed
    TransferSuccess,
    /// An outbound transfer failed
    TransferFailed,
    /// An outbound transfer was reversed after completing
    TransferReversed,
    /// Any event type this service does not act on
    Other,
}

impl EventKind {
    pub fn parse(event: &str) -> Self {
        match event {
            "charge.success" => Self::ChargeSuccess,
            "transfer.success" => Self::TransferSuccess,
            "transfer.failed" => Self::TransferFailed,
            "transfer.reversed" => Self::TransferReversed,
            _ => Self::Other,
        }
    }
}

/// A raw webhook delivery from the payment gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayEvent {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl GatewayEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::parse(&self.event)
    }

    /// The unique reference correlating this event with a ledger transaction
    pub fn reference(&self) -> Option<&str> {
        self.data.get("reference").and_then(|v| v.as_str())
    }

    /// Event amount in minor units (kobo)
    pub fn amount_minor(&self) -> Option<i64> {
        self.data.get("amount").and_then(|v| v.as_i64())
    }

    /// Event amount in major units (naira)
    pub fn amount(&self) -> Option<Decimal> {
        self.amount_minor()
            .map(|minor| Decimal::new(minor, 2))
    }

    /// Gateway-side id of the charge or transfer, stringified
    ///
    /// Paystack sends numeric ids for charges and string codes for
    /// transfers, so both are accepted.
    pub fn gateway_id(&self) -> Option<String> {
        match self.data.get("id") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Payment channel (card, bank, ussd, ...), present on charge events
    pub fn channel(&self) -> Option<String> {
        self.data
            .get("channel")
            .and_then(|v| v.as_str())
            .map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(event: &str) -> GatewayEvent {
        serde_json::from_value(serde_json::json!({
            "event": event,
            "data": {
                "reference": "FUND_1700000000_42",
                "amount": 100_000,
                "id": 3_245_112,
                "channel": "card",
                "currency": "NGN"
            }
        }))
        .unwrap()
    }

    #[test]
    fn parses_known_event_kinds() {
        assert_eq!(EventKind::parse("charge.success"), EventKind::ChargeSuccess);
        assert_eq!(EventKind::parse("transfer.success"), EventKind::TransferSuccess);
        assert_eq!(EventKind::parse("transfer.failed"), EventKind::TransferFailed);
        assert_eq!(EventKind::parse("transfer.reversed"), EventKind::TransferReversed);
        assert_eq!(EventKind::parse("subscription.create"), EventKind::Other);
    }

    #[test]
    fn converts_minor_units_to_major() {
        let event = sample("charge.success");
        assert_eq!(event.amount_minor(), Some(100_000));
        assert_eq!(event.amount(), Some(dec!(1000.00)));
    }

    #[test]
    fn stringifies_numeric_gateway_id() {
        let event = sample("charge.success");
        assert_eq!(event.gateway_id().as_deref(), Some("3245112"));
    }

    #[test]
    fn string_gateway_id_is_kept_as_is() {
        let event: GatewayEvent = serde_json::from_value(serde_json::json!({
            "event": "transfer.success",
            "data": { "reference": "abc", "amount": 50_000, "id": "TRF_x9k2" }
        }))
        .unwrap();
        assert_eq!(event.gateway_id().as_deref(), Some("TRF_x9k2"));
    }

    #[test]
    fn missing_fields_yield_none() {
        let event: GatewayEvent =
            serde_json::from_value(serde_json::json!({ "event": "charge.success" })).unwrap();
        assert_eq!(event.reference(), None);
        assert_eq!(event.amount(), None);
        assert_eq!(event.gateway_id(), None);
        assert_eq!(event.channel(), None);
    }
}
