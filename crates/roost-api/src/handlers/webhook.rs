//! Payment gateway webhook endpoint
//!
//! The signature is an HMAC over the raw request body, so the body is
//! taken as bytes and only parsed as JSON after verification. Every
//! authenticated delivery is acknowledged with 200, including unknown
//! references and duplicates, so the gateway stops retrying.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use std::sync::Arc;

use roost_db::repos::ledger::ReconcileOutcome;
use roost_paystack::{verify_signature, SIGNATURE_HEADER};
use roost_types::webhook::{EventKind, GatewayEvent};

use crate::dto::MessageResponse;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Receive a signed gateway event and reconcile it against the ledger
#[utoipa::path(
    post,
    path = "/api/v1/wallet/webhook",
    tag = "Wallet",
    responses(
        (status = 200, description = "Event acknowledged", body = MessageResponse),
        (status = 401, description = "Invalid or missing signature")
    )
)]
pub async fn paystack_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::InvalidSignature)?;

    if !verify_signature(&state.settings.paystack_secret, &body, signature) {
        tracing::warn!("Webhook rejected: signature mismatch");
        return Err(ApiError::InvalidSignature);
    }

    // An authenticated body that never parses would be redelivered
    // forever on a non-2xx, so acknowledge and drop it.
    let Some(event) = parse_event(&body) else {
        return Ok(Json(MessageResponse::new("event ignored")));
    };

    let kind = event.kind();
    if kind == EventKind::Other {
        tracing::debug!(event = %event.event, "Webhook event type not handled");
        return Ok(Json(MessageResponse::new("event ignored")));
    }

    let Some(reference) = event.reference() else {
        tracing::warn!(event = %event.event, "Webhook event carries no reference");
        return Ok(Json(MessageResponse::new("event ignored")));
    };

    // Transfer events do not always echo the amount, so fall back to
    // the amount recorded on the ledger row at initiation.
    let amount = match event.amount() {
        Some(amount) => amount,
        None => {
            let Some(row) = state.db.ledger_repo().find_by_reference(reference).await? else {
                tracing::info!(reference, "Webhook reference not ours");
                return Ok(Json(MessageResponse::new("event acknowledged")));
            };
            row.amount
        }
    };

    let outcome = state
        .db
        .ledger_repo()
        .apply_event(
            kind,
            reference,
            amount,
            event.gateway_id().as_deref(),
            event.channel().as_deref(),
            &event.data,
        )
        .await?;

    let message = match outcome {
        ReconcileOutcome::UnknownReference => {
            tracing::info!(reference, "Webhook reference not ours");
            "event acknowledged"
        }
        ReconcileOutcome::AlreadySettled => {
            tracing::info!(reference, "Duplicate webhook delivery absorbed");
            "event acknowledged"
        }
        ReconcileOutcome::Ignored => {
            tracing::info!(reference, event = %event.event, "Event does not apply to transaction");
            "event acknowledged"
        }
        ReconcileOutcome::Applied(decision) => {
            tracing::info!(reference, ?decision, "Webhook event applied");
            "event processed"
        }
    };

    Ok(Json(MessageResponse::new(message)))
}

fn parse_event(body: &[u8]) -> Option<GatewayEvent> {
    match serde_json::from_slice(body) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!(error = %e, "Webhook body is not a gateway event");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_bodies_are_dropped_not_errored() {
        assert!(parse_event(b"not json at all").is_none());
        assert!(parse_event(b"{\"data\": {}}").is_none());
    }

    #[test]
    fn well_formed_events_parse() {
        let event =
            parse_event(br#"{"event": "charge.success", "data": {"reference": "r1"}}"#).unwrap();
        assert_eq!(event.kind(), EventKind::ChargeSuccess);
        assert_eq!(event.reference(), Some("r1"));
    }
}
