//! Property listing types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ledger::ParseLedgerError;

/// Whether a listing is still on the market
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SaleStatus {
    Available,
    Sold,
}

impl SaleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Sold => "SOLD",
        }
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        Self::Available
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = ParseLedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "SOLD" => Ok(Self::Sold),
            other => Err(ParseLedgerError(other.to_string())),
        }
    }
}

/// Per-user property relations that can be toggled on and off
///
/// Toggling `Bought` additionally flips the listing's [`SaleStatus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyAction {
    Bought,
    Wishlist,
    Invested,
    Rented,
}

impl PropertyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bought => "bought",
            Self::Wishlist => "wishlist",
            Self::Invested => "invested",
            Self::Rented => "rented",
        }
    }

    pub const ALL: [PropertyAction; 4] = [
        Self::Bought,
        Self::Wishlist,
        Self::Invested,
        Self::Rented,
    ];
}

impl fmt::Display for PropertyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyAction {
    type Err = ParseLedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bought" => Ok(Self::Bought),
            "wishlist" => Ok(Self::Wishlist),
            "invested" => Ok(Self::Invested),
            "rented" => Ok(Self::Rented),
            other => Err(ParseLedgerError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_round_trips() {
        for action in PropertyAction::ALL {
            assert_eq!(action.as_str().parse::<PropertyAction>(), Ok(action));
        }
    }

    #[test]
    fn invalid_action_is_rejected() {
        assert!("leased".parse::<PropertyAction>().is_err());
    }
}
