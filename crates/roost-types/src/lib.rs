//! Roost Types - Canonical domain types for the Roost marketplace
//!
//! This crate contains all foundational types for Roost with zero dependencies
//! on other roost crates. It defines:
//!
//! - User roles and KYC lifecycle states
//! - Wallet ledger types (transaction type and status)
//! - Property sale status and user/property relation actions
//! - Payment gateway webhook events and the reconciliation state machine
//!
//! # Architectural Invariants
//!
//! 1. A ledger transaction's status transitions exactly once, from PENDING to
//!    a terminal state (SUCCESS or FAILED); terminal rows are never mutated.
//! 2. Wallet balance changes commit atomically with the ledger-status write
//!    that triggered them.
//! 3. Webhook reconciliation decisions are pure: the same event against the
//!    same ledger state always produces the same [`reconcile::Decision`].

pub mod ledger;
pub mod property;
pub mod reconcile;
pub mod user;
pub mod webhook;

pub use ledger::*;
pub use property::*;
pub use reconcile::*;
pub use user::*;
pub use webhook::*;

/// Version of the Roost types schema
pub const TYPES_VERSION: &str = "0.1.0";

/// Wallet currency fixed at creation time
pub const DEFAULT_CURRENCY: &str = "NGN";

/// Minimum wallet funding amount in major currency units (NGN)
pub const MIN_FUNDING_AMOUNT: i64 = 500;
