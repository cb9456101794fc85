//! Transfer Ledger - in-memory accounts with atomic transfers
//!
//! Keeps a set of monetary accounts in process memory and moves funds between
//! them under concurrent access without ever exposing a negative balance, a lost
//! update, or a half-applied transfer.
//!
//! # Modules
//!
//! - [`core_types`] - `AccountId` and `Amount`
//! - [`account`] - Account entity, ledger store, field validation
//! - [`transfer`] - Transfer engine, concurrency guard, error taxonomy, notifications
//! - [`service`] - Accounts service facade used by every boundary
//! - [`gateway`] - HTTP boundary (axum)
//! - [`config`] / [`logging`] - YAML configuration and tracing setup

// Core types - must be first!
pub mod core_types;

pub mod account;
pub mod config;
pub mod gateway;
pub mod logging;
pub mod service;
pub mod transfer;

// Convenient re-exports at crate root
pub use account::{Account, AccountRepository, InMemoryAccountRepository, RepositoryError};
pub use core_types::{AccountId, Amount};
pub use service::AccountsService;
pub use transfer::{
    LockMode, NotificationService, TransferCoordinator, TransferError, TransferGuard,
    TransferReceipt, TransferRequest,
};
