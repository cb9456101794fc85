//! Transfer Coordinator
//!
//! The transfer engine: resolves both accounts, enters the critical section,
//! re-validates against the latest stored balances, writes the debit and the
//! credit, and reports both sides to the notifier.
//!
//! # Sufficiency policy
//!
//! A transfer proceeds only when `amount > 0`, `balance > min_balance` and
//! `amount < balance`. Moving the entire balance is rejected.
//!
//! # Safety Invariants
//!
//! 1. **Re-validate under lock**: the pre-lock read is only an existence check;
//!    the balance check always uses a fresh read taken inside the critical section
//! 2. **Pairwise visibility**: both writes finish before the section is released
//! 3. **No partial state**: a failed credit write is compensated by restoring the debit
//! 4. **Run to completion**: once the section is held the work runs on its own task,
//!    so a caller that goes away cannot stop it between the debit and the credit
//! 5. **Notifications outside the lock**: messages are built under the lock and
//!    delivered after release, each bounded by the notification timeout

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, Utc};
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::error::TransferError;
use super::guard::TransferGuard;
use super::notification::{NotificationService, transfer_description};
use super::types::{TransferAction, TransferId, TransferReceipt, TransferRequest};
use crate::account::{Account, AccountRepository};
use crate::core_types::Amount;

/// Default bound on a single notifier call
pub const DEFAULT_NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Transfer Coordinator - executes transfers against the ledger store
pub struct TransferCoordinator {
    ledger: Ledger,
    guard: TransferGuard,
}

/// Everything the critical section needs, cheap to clone into its task.
#[derive(Clone)]
struct Ledger {
    repository: Arc<dyn AccountRepository>,
    notifier: Option<Arc<dyn NotificationService>>,
    min_balance: Amount,
    notification_timeout: Duration,
}

/// One customer message, built under the lock and sent after release.
struct Notice {
    account: Account,
    action: TransferAction,
    description: String,
}

impl TransferCoordinator {
    /// Global lock, no timeout, zero minimum balance
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        notifier: Option<Arc<dyn NotificationService>>,
    ) -> Self {
        Self {
            ledger: Ledger {
                repository,
                notifier,
                min_balance: Decimal::ZERO,
                notification_timeout: DEFAULT_NOTIFICATION_TIMEOUT,
            },
            guard: TransferGuard::default(),
        }
    }

    pub fn with_guard(mut self, guard: TransferGuard) -> Self {
        self.guard = guard;
        self
    }

    /// The source balance must be strictly above this for a transfer to proceed.
    pub fn with_min_balance(mut self, min_balance: Amount) -> Self {
        self.ledger.min_balance = min_balance;
        self
    }

    /// Upper bound on each notifier call; a slower call is abandoned and logged.
    pub fn with_notification_timeout(mut self, timeout: Duration) -> Self {
        self.ledger.notification_timeout = timeout;
        self
    }

    pub fn has_notifier(&self) -> bool {
        self.ledger.notifier.is_some()
    }

    /// Move `req.amount` from `req.from_account_id` to `req.to_account_id`.
    ///
    /// Dropping the returned future before the critical section is entered
    /// abandons the transfer with nothing written. After that point the
    /// transfer completes on its own task whether or not anyone awaits it.
    ///
    /// # Errors
    /// - `AccountNotFound` listing every missing id; nothing is written
    /// - `InsufficientBalance` under the sufficiency policy; nothing is written
    /// - `LockTimeout` if a bounded wait is configured and expires; nothing is written
    /// - `Storage` if a write fails and the ledger was restored
    /// - `LedgerInconsistent` if the credit write and its compensation both failed
    /// - `Aborted` if the transfer task itself died
    pub async fn transfer(&self, req: &TransferRequest) -> Result<TransferReceipt, TransferError> {
        let transfer_id = TransferId::new();

        let rejected = |e: &TransferError| {
            warn!(
                transfer_id = %transfer_id,
                from = %req.from_account_id,
                to = %req.to_account_id,
                amount = %req.amount,
                code = e.code(),
                "Transfer rejected before lock: {}", e
            )
        };

        // 1. Existence check on snapshots (not trusted for balances)
        self.ledger
            .resolve(&req.from_account_id, &req.to_account_id)
            .await
            .inspect_err(rejected)?;

        // 2. Critical section
        let section = self
            .guard
            .enter(&req.from_account_id, &req.to_account_id)
            .await
            .inspect_err(rejected)?;

        // 3. Detached from the caller from here on
        let ledger = self.ledger.clone();
        let req = req.clone();
        let task = tokio::spawn(async move {
            let outcome = ledger.execute_locked(transfer_id, &req).await;
            drop(section);

            match outcome {
                Ok((receipt, notices)) => {
                    info!(
                        transfer_id = %transfer_id,
                        from = %req.from_account_id,
                        to = %req.to_account_id,
                        amount = %req.amount,
                        from_balance = %receipt.from_balance,
                        to_balance = %receipt.to_balance,
                        "Transfer committed"
                    );
                    ledger.dispatch_notifications(notices).await;
                    Ok(receipt)
                }
                Err(e) => {
                    warn!(
                        transfer_id = %transfer_id,
                        from = %req.from_account_id,
                        to = %req.to_account_id,
                        amount = %req.amount,
                        code = e.code(),
                        "Transfer rejected: {}", e
                    );
                    Err(e)
                }
            }
        });

        task.await.unwrap_or_else(|e| {
            error!(transfer_id = %transfer_id, error = %e, "Transfer task failed");
            Err(TransferError::Aborted(e.to_string()))
        })
    }
}

impl Ledger {
    async fn execute_locked(
        &self,
        transfer_id: TransferId,
        req: &TransferRequest,
    ) -> Result<(TransferReceipt, Vec<Notice>), TransferError> {
        let amount = req.amount;

        // Fresh reads under the lock
        let (from, to) = self
            .resolve(&req.from_account_id, &req.to_account_id)
            .await?;
        self.check_sufficient(&from, amount)?;

        let debited_balance = from
            .balance()
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientBalance)?;

        let (debited, credited) = if req.is_self_transfer() {
            self.apply_self_transfer(from, debited_balance, amount)
                .await?
        } else {
            let credited_balance = to.balance().checked_add(amount).ok_or_else(|| {
                TransferError::InvalidRequest("Amount would cause overflow".to_string())
            })?;
            self.apply_pair(from, to, debited_balance, credited_balance)
                .await?
        };

        let notices = self.build_notices(&debited, debited_balance, &credited, amount);

        let receipt = TransferReceipt {
            transfer_id,
            from_account_id: req.from_account_id.clone(),
            to_account_id: req.to_account_id.clone(),
            amount,
            // A self-transfer ends at the credited balance
            from_balance: if req.is_self_transfer() {
                credited.balance()
            } else {
                debited.balance()
            },
            to_balance: credited.balance(),
            timestamp: Utc::now(),
        };
        Ok((receipt, notices))
    }

    /// Look up both accounts, reporting every missing id.
    async fn resolve(&self, from_id: &str, to_id: &str) -> Result<(Account, Account), TransferError> {
        let from = self.repository.get(from_id).await;
        let to = if from_id == to_id {
            from.clone()
        } else {
            self.repository.get(to_id).await
        };

        match (from, to) {
            (Some(from), Some(to)) => Ok((from, to)),
            (from, to) => {
                let mut missing = Vec::with_capacity(2);
                if from.is_none() {
                    missing.push(from_id.to_string());
                }
                if to.is_none() && from_id != to_id {
                    missing.push(to_id.to_string());
                }
                Err(TransferError::AccountNotFound(missing))
            }
        }
    }

    fn check_sufficient(&self, from: &Account, amount: Amount) -> Result<(), TransferError> {
        let balance = from.balance();
        if amount > Decimal::ZERO && balance > self.min_balance && amount < balance {
            Ok(())
        } else {
            debug!(
                account = from.account_id(),
                %balance,
                %amount,
                "Sufficiency check failed"
            );
            Err(TransferError::InsufficientBalance)
        }
    }

    /// Debit then credit the same record; a single write persists the result.
    async fn apply_self_transfer(
        &self,
        mut account: Account,
        debited_balance: Amount,
        amount: Amount,
    ) -> Result<(Account, Account), TransferError> {
        account.set_balance(debited_balance);
        let debited = account.clone();

        let credited_balance = debited_balance.checked_add(amount).ok_or_else(|| {
            TransferError::InvalidRequest("Amount would cause overflow".to_string())
        })?;
        account.set_balance(credited_balance);

        self.repository.update(&account).await.map_err(|e| {
            error!(account = account.account_id(), error = %e, "Self-transfer write failed");
            TransferError::from(e)
        })?;
        Ok((debited, account))
    }

    /// Persist the debit, then the credit. A failed credit restores the debit.
    async fn apply_pair(
        &self,
        mut from: Account,
        mut to: Account,
        debited_balance: Amount,
        credited_balance: Amount,
    ) -> Result<(Account, Account), TransferError> {
        let original = from.clone();

        from.set_balance(debited_balance);
        self.repository.update(&from).await.map_err(|e| {
            error!(account = from.account_id(), error = %e, "Debit write failed");
            TransferError::from(e)
        })?;

        to.set_balance(credited_balance);
        if let Err(e) = self.repository.update(&to).await {
            error!(account = to.account_id(), error = %e, "Credit write failed, compensating debit");
            return match self.repository.update(&original).await {
                Ok(()) => Err(TransferError::from(e)),
                Err(comp) => {
                    error!(
                        from = original.account_id(),
                        to = to.account_id(),
                        error = %comp,
                        "Compensating write failed, ledger is inconsistent"
                    );
                    Err(TransferError::LedgerInconsistent {
                        from: original.account_id().to_string(),
                        to: to.account_id().to_string(),
                    })
                }
            };
        }

        Ok((from, to))
    }

    /// Messages carry the post-transfer balances as of the commit.
    fn build_notices(
        &self,
        debited: &Account,
        debited_balance: Amount,
        credited: &Account,
        amount: Amount,
    ) -> Vec<Notice> {
        if self.notifier.is_none() {
            return Vec::new();
        }
        let today = Local::now().date_naive();

        [
            (debited, TransferAction::Debited, debited_balance),
            (credited, TransferAction::Credited, credited.balance()),
        ]
        .into_iter()
        .map(|(account, action, balance)| Notice {
            account: account.clone(),
            action,
            description: transfer_description(account.account_id(), amount, action, balance, today),
        })
        .collect()
    }

    async fn dispatch_notifications(&self, notices: Vec<Notice>) {
        let Some(notifier) = &self.notifier else {
            return;
        };

        for notice in notices {
            let delivery = notifier.notify_about_transfer(&notice.account, &notice.description);
            match tokio::time::timeout(self.notification_timeout, delivery).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(
                    account = notice.account.account_id(),
                    action = notice.action.as_str(),
                    error = %e,
                    "Notification dropped"
                ),
                Err(_) => warn!(
                    account = notice.account.account_id(),
                    action = notice.action.as_str(),
                    timeout = ?self.notification_timeout,
                    "Notification timed out"
                ),
            }
        }
    }
}
