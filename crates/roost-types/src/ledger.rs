//! Wallet ledger types
//!
//! A `Transaction` row records one funding or withdrawal attempt against a
//! wallet, correlated with the payment gateway through a unique reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Direction of a ledger transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Wallet funding via a gateway charge
    Fund,
    /// Wallet withdrawal via a gateway transfer
    Withdraw,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fund => "FUND",
            Self::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a ledger enum from its stored string form
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown ledger value: {0}")]
pub struct ParseLedgerError(pub String);

impl FromStr for TransactionType {
    type Err = ParseLedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FUND" => Ok(Self::Fund),
            "WITHDRAW" => Ok(Self::Withdraw),
            other => Err(ParseLedgerError(other.to_string())),
        }
    }
}

/// Lifecycle state of a ledger transaction
///
/// The only permitted transitions are `Pending -> Success` and
/// `Pending -> Failed`. Both targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

impl TransactionStatus {
    /// Terminal states are never mutated again; this is the idempotency
    /// guard against duplicate webhook delivery.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ParseLedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            other => Err(ParseLedgerError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_stored_form() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Success,
            TransactionStatus::Failed,
        ] {
            assert_eq!(status.as_str().parse::<TransactionStatus>(), Ok(status));
        }
    }

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!TransactionStatus::Pending.is_terminal());
        assert!(TransactionStatus::Success.is_terminal());
        assert!(TransactionStatus::Failed.is_terminal());
    }

    #[test]
    fn unknown_stored_value_is_rejected() {
        assert!("REFUNDED".parse::<TransactionStatus>().is_err());
        assert!("fund".parse::<TransactionType>().is_err());
    }
}
