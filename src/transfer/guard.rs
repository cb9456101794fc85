//! Transfer concurrency guard
//!
//! Serializes transfers so that a debit and its credit are never observed apart.
//!
//! # Modes
//!
//! - [`LockMode::Global`]: one process-wide mutex; every transfer queues behind it.
//! - [`LockMode::PerAccount`]: one mutex per account id. Both locks of a transfer are
//!   taken in ascending id order, so two transfers over the same pair can never hold
//!   one lock each and wait on the other.
//!
//! Waiting is unbounded unless a timeout is configured. Dropping the
//! [`CriticalSection`] releases every lock it holds.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use super::error::TransferError;

/// Locking discipline for the critical section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    #[default]
    Global,
    PerAccount,
}

type LockTable = DashMap<String, Arc<Mutex<()>>>;

/// Held for the duration of a transfer's read-validate-write sequence.
///
/// On drop the locks are released and per-account entries nobody else is
/// holding or waiting on are evicted from the lock table.
#[must_use = "the critical section ends as soon as this guard is dropped"]
pub struct CriticalSection {
    held: Vec<OwnedMutexGuard<()>>,
    table: Option<Arc<LockTable>>,
    ids: Vec<String>,
}

impl CriticalSection {
    /// Number of distinct locks held (1 for global mode or a self-transfer).
    pub fn lock_count(&self) -> usize {
        self.held.len()
    }
}

impl Drop for CriticalSection {
    fn drop(&mut self) {
        self.held.clear();
        if let Some(table) = self.table.take() {
            for id in self.ids.drain(..) {
                // Clones are only handed out under the shard lock, so a count of
                // one here means no holder and no waiter.
                table.remove_if(&id, |_, lock| Arc::strong_count(lock) == 1);
            }
        }
    }
}

pub struct TransferGuard {
    mode: LockMode,
    timeout: Option<Duration>,
    global: Arc<Mutex<()>>,
    /// Lazily populated, pruned as sections are released.
    per_account: Arc<LockTable>,
}

impl Default for TransferGuard {
    fn default() -> Self {
        Self::new(LockMode::Global, None)
    }
}

impl TransferGuard {
    pub fn new(mode: LockMode, timeout: Option<Duration>) -> Self {
        Self {
            mode,
            timeout,
            global: Arc::new(Mutex::new(())),
            per_account: Arc::new(DashMap::new()),
        }
    }

    /// Per-account lock entries currently in the table.
    pub fn tracked_locks(&self) -> usize {
        self.per_account.len()
    }

    /// Enter the critical section covering accounts `a` and `b`.
    ///
    /// # Errors
    /// `LockTimeout` if a timeout is configured and the locks were not all
    /// acquired in time. Any lock taken before the deadline is released.
    pub async fn enter(&self, a: &str, b: &str) -> Result<CriticalSection, TransferError> {
        let acquire = self.acquire(a, b);
        let section = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, acquire)
                .await
                .map_err(|_| TransferError::LockTimeout(limit))?,
            None => acquire.await,
        };
        debug!(
            mode = ?self.mode,
            a,
            b,
            locks = section.lock_count(),
            tracked = self.tracked_locks(),
            "Critical section entered"
        );
        Ok(section)
    }

    async fn acquire(&self, a: &str, b: &str) -> CriticalSection {
        match self.mode {
            LockMode::Global => CriticalSection {
                held: vec![self.global.clone().lock_owned().await],
                table: None,
                ids: Vec::new(),
            },
            LockMode::PerAccount => {
                let (first, second) = if a <= b { (a, b) } else { (b, a) };
                // Built up in place so a cancelled wait still prunes what it touched
                let mut section = CriticalSection {
                    held: Vec::with_capacity(2),
                    table: Some(self.per_account.clone()),
                    ids: vec![first.to_string()],
                };
                if first != second {
                    section.ids.push(second.to_string());
                }
                let first_lock = self.lock_for(first);
                section.held.push(first_lock.lock_owned().await);
                if first != second {
                    let second_lock = self.lock_for(second);
                    section.held.push(second_lock.lock_owned().await);
                }
                section
            }
        }
    }

    fn lock_for(&self, account_id: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.per_account.get(account_id) {
            return lock.clone();
        }
        self.per_account
            .entry(account_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
