//! Request handlers, one module per domain

pub mod admin;
pub mod auth;
pub mod bank;
pub mod health;
pub mod property;
pub mod wallet;
pub mod webhook;
