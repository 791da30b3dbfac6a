//! Domain repositories

pub mod bank_account;
pub mod ledger;
pub mod property;
pub mod user;
pub mod wallet;

pub use bank_account::BankAccountRepo;
pub use ledger::{LedgerRepo, ReconcileOutcome};
pub use property::{NewProperty, PropertyRepo, PropertyUpdate};
pub use user::UserRepo;
pub use wallet::WalletRepo;
