//! Account-to-account transfers
//!
//! Moves funds between two accounts of the in-memory ledger so that no caller
//! ever observes a negative balance, a lost update, or a debit without its credit.
//!
//! # Flow
//!
//! ```text
//! resolve(from, to) ──▶ enter guard ──▶ re-read + validate ──▶ write debit ──▶ write credit
//!        │                   │                 │                                  │
//!   AccountNotFound     LockTimeout     InsufficientBalance          (compensate on failure)
//!                                                                                 │
//!                                                         notify(debit), notify(credit) ──▶ release
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Conservation**: `from + to` is the same before and after every transfer
//! 2. **Non-negativity**: no balance drops below zero
//! 3. **No-op rejection**: a failed transfer leaves both balances untouched
//! 4. **Fire-and-forget notifications**: notifier errors never reach the caller

pub mod coordinator;
pub mod error;
pub mod guard;
pub mod notification;
pub mod types;


// Re-exports for convenience
pub use coordinator::TransferCoordinator;
pub use error::{INSUFFICIENT_BALANCE, TransferError};
pub use guard::{CriticalSection, LockMode, TransferGuard};
pub use notification::{
    LoggingNotifier, NotificationError, NotificationService, mask_account_id,
    transfer_description,
};
pub use types::{TransferAction, TransferId, TransferReceipt, TransferRequest};
