//! HTTP handlers
//!
//! Handlers translate request bodies into service calls and service errors
//! into [`ApiError`](super::types::ApiError). No ledger logic lives here.

pub mod account;
pub mod health;
pub mod transfer;

pub use account::{create_account, get_account};
pub use health::health_check;
pub use transfer::transfer_money;
