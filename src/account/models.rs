//! Data models for the account ledger

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core_types::{AccountId, Amount};

/// A monetary account.
///
/// # Invariants:
/// - `account_id` is immutable after creation (no setter)
/// - `balance >= 0` once any transfer completes
///
/// The store hands out snapshots (clones); mutating a snapshot has no effect
/// until it is written back with `AccountRepository::update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    account_id: AccountId,
    balance: Amount,
}

impl Account {
    /// New account with a zero balance
    pub fn new(account_id: impl Into<AccountId>) -> Self {
        Self::with_balance(account_id, Decimal::ZERO)
    }

    pub fn with_balance(account_id: impl Into<AccountId>, balance: Amount) -> Self {
        Self {
            account_id: account_id.into(),
            balance,
        }
    }

    #[inline]
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    #[inline]
    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Only the transfer engine moves balances; the store sees the result via `update`.
    pub(crate) fn set_balance(&mut self, balance: Amount) {
        self.balance = balance;
    }
}
