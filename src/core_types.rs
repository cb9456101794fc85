//! Core types used throughout the system
//!
//! These are fundamental type aliases used by all modules.

/// Account ID - unique, case-sensitive, immutable after creation.
///
/// # Usage:
/// - Primary key of the ledger store
/// - Lock table key in per-account locking mode
/// - Total order for deadlock-free lock acquisition (byte-wise `Ord`)
pub type AccountId = String;

/// Monetary amount.
///
/// Fixed-point decimal; two or more fractional digits are represented exactly,
/// so `0.1 + 0.2 == 0.3` holds and balances never drift.
pub type Amount = rust_decimal::Decimal;
