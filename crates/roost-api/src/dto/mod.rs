//! Request and response DTOs

pub mod admin;
pub mod auth;
pub mod bank;
pub mod common;
pub mod property;
pub mod wallet;

pub use admin::*;
pub use auth::*;
pub use bank::*;
pub use common::*;
pub use property::*;
pub use wallet::*;
