//! User roles and KYC lifecycle

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ledger::ParseLedgerError;

/// Platform roles, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular buyer account
    Normal,
    /// Account allowed to list properties
    Seller,
    /// Platform administrator
    Admin,
    /// Administrator able to manage other admins
    Superadmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Seller => "seller",
            Self::Admin => "admin",
            Self::Superadmin => "superadmin",
        }
    }

    /// Admin and superadmin accounts pass role-guarded routes
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::Superadmin)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Normal
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ParseLedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            other => Err(ParseLedgerError(other.to_string())),
        }
    }
}

/// KYC verification state of a user account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KycStatus {
    /// Account created, no documents submitted
    Unverified,
    /// Documents submitted, awaiting review
    Pending,
    Verified,
    Rejected,
    /// Administratively suspended
    Suspended,
}

impl KycStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unverified => "UNVERIFIED",
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl Default for KycStatus {
    fn default() -> Self {
        Self::Unverified
    }
}

impl fmt::Display for KycStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KycStatus {
    type Err = ParseLedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNVERIFIED" => Ok(Self::Unverified),
            "PENDING" => Ok(Self::Pending),
            "VERIFIED" => Ok(Self::Verified),
            "REJECTED" => Ok(Self::Rejected),
            "SUSPENDED" => Ok(Self::Suspended),
            other => Err(ParseLedgerError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_roles() {
        assert!(!UserRole::Normal.is_admin());
        assert!(!UserRole::Seller.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::Superadmin.is_admin());
    }

    #[test]
    fn role_round_trips() {
        for role in [
            UserRole::Normal,
            UserRole::Seller,
            UserRole::Admin,
            UserRole::Superadmin,
        ] {
            assert_eq!(role.as_str().parse::<UserRole>(), Ok(role));
        }
    }

    #[test]
    fn kyc_round_trips() {
        for status in [
            KycStatus::Unverified,
            KycStatus::Pending,
            KycStatus::Verified,
            KycStatus::Rejected,
            KycStatus::Suspended,
        ] {
            assert_eq!(status.as_str().parse::<KycStatus>(), Ok(status));
        }
    }
}
