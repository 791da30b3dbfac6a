//! Webhook reconciliation state machine
//!
//! Given a gateway event and the current ledger state, [`decide`] returns
//! what must happen inside the atomic apply step. The decision is pure so
//! the state machine can be tested exhaustively without a database; the
//! persistence layer is responsible for executing a decision atomically
//! (balance mutation and status write commit together or not at all).

use crate::ledger::{TransactionStatus, TransactionType};
use crate::webhook::EventKind;

/// Outcome of reconciling one gateway event against one ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Credit the wallet by the event amount and mark the transaction
    /// SUCCESS (funding confirmed).
    CreditAndSucceed,
    /// Mark the transaction SUCCESS without touching the balance (the
    /// withdrawal amount was debited eagerly at request time).
    Succeed,
    /// Refund the amount into the wallet and mark the transaction FAILED
    /// (withdrawal transfer failed or was reversed).
    RefundAndFail,
    /// Acknowledge the delivery without any mutation.
    Ignore,
}

impl Decision {
    /// Whether executing this decision writes to storage
    pub fn mutates(&self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

/// Decide how a gateway event applies to a ledger transaction.
///
/// A terminal transaction always yields [`Decision::Ignore`] regardless of
/// the event: the gateway delivers at-least-once and replays must be
/// absorbed without a second balance change. Events whose kind does not
/// match the transaction's direction (a charge event against a WITHDRAW
/// row, or a transfer event against a FUND row) are also ignored rather
/// than treated as errors.
pub fn decide(
    kind: EventKind,
    tx_type: TransactionType,
    status: TransactionStatus,
) -> Decision {
    if status.is_terminal() {
        return Decision::Ignore;
    }

    match (kind, tx_type) {
        (EventKind::ChargeSuccess, TransactionType::Fund) => Decision::CreditAndSucceed,
        (EventKind::TransferSuccess, TransactionType::Withdraw) => Decision::Succeed,
        (EventKind::TransferFailed, TransactionType::Withdraw)
        | (EventKind::TransferReversed, TransactionType::Withdraw) => Decision::RefundAndFail,
        _ => Decision::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use TransactionStatus::*;
    use TransactionType::*;

    #[test]
    fn funding_success_credits_pending_transaction() {
        assert_eq!(
            decide(EventKind::ChargeSuccess, Fund, Pending),
            Decision::CreditAndSucceed
        );
    }

    #[test]
    fn transfer_success_finalizes_without_balance_change() {
        assert_eq!(
            decide(EventKind::TransferSuccess, Withdraw, Pending),
            Decision::Succeed
        );
    }

    #[test]
    fn transfer_failure_refunds() {
        assert_eq!(
            decide(EventKind::TransferFailed, Withdraw, Pending),
            Decision::RefundAndFail
        );
        assert_eq!(
            decide(EventKind::TransferReversed, Withdraw, Pending),
            Decision::RefundAndFail
        );
    }

    #[test]
    fn terminal_transactions_absorb_replays() {
        // At-least-once delivery: the second, third, nth delivery of the
        // same event must never double-apply a balance change.
        for kind in [
            EventKind::ChargeSuccess,
            EventKind::TransferSuccess,
            EventKind::TransferFailed,
            EventKind::TransferReversed,
        ] {
            for tx_type in [Fund, Withdraw] {
                assert_eq!(decide(kind, tx_type, Success), Decision::Ignore);
                assert_eq!(decide(kind, tx_type, Failed), Decision::Ignore);
            }
        }
    }

    #[test]
    fn mismatched_direction_is_ignored() {
        assert_eq!(decide(EventKind::ChargeSuccess, Withdraw, Pending), Decision::Ignore);
        assert_eq!(decide(EventKind::TransferSuccess, Fund, Pending), Decision::Ignore);
        assert_eq!(decide(EventKind::TransferFailed, Fund, Pending), Decision::Ignore);
    }

    #[test]
    fn unrecognized_events_are_ignored() {
        assert_eq!(decide(EventKind::Other, Fund, Pending), Decision::Ignore);
        assert_eq!(decide(EventKind::Other, Withdraw, Pending), Decision::Ignore);
    }

    #[test]
    fn only_ignore_leaves_storage_untouched() {
        assert!(!Decision::Ignore.mutates());
        assert!(Decision::CreditAndSucceed.mutates());
        assert!(Decision::Succeed.mutates());
        assert!(Decision::RefundAndFail.mutates());
    }
}
