//! Ledger store
//!
//! [`AccountRepository`] is the seam the transfer engine consumes. It is
//! thread-safe per key but makes no promise about atomicity across keys:
//! pairing a debit with its credit is the engine's job.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use thiserror::Error;

use super::models::Account;

/// Ledger store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Account id {0} already exists!")]
    DuplicateAccountId(String),

    #[error("Account {0} is not in the store")]
    AccountMissing(String),

    #[error("Write failed for account {account_id}: {reason}")]
    Write { account_id: String, reason: String },
}

/// Key-value store from account id to [`Account`].
///
/// `get` returns a snapshot; later writes by other callers are not reflected in it.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. Fails if the id is taken.
    async fn create(&self, account: Account) -> Result<(), RepositoryError>;

    async fn get(&self, account_id: &str) -> Option<Account>;

    /// Overwrite an existing account's state.
    async fn update(&self, account: &Account) -> Result<(), RepositoryError>;

    /// Remove every account (test/reset utility)
    async fn clear(&self);
}

/// DashMap-backed store, one shard lock per key group.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: DashMap<String, Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: DashMap::new(),
        }
    }

    /// Number of stored accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<(), RepositoryError> {
        match self.accounts.entry(account.account_id().to_string()) {
            Entry::Occupied(_) => Err(RepositoryError::DuplicateAccountId(
                account.account_id().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }

    async fn get(&self, account_id: &str) -> Option<Account> {
        self.accounts.get(account_id).map(|entry| entry.value().clone())
    }

    async fn update(&self, account: &Account) -> Result<(), RepositoryError> {
        match self.accounts.get_mut(account.account_id()) {
            Some(mut entry) => {
                *entry = account.clone();
                Ok(())
            }
            None => Err(RepositoryError::AccountMissing(
                account.account_id().to_string(),
            )),
        }
    }

    async fn clear(&self) {
        self.accounts.clear();
    }
}
