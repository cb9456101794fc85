//! Accounts service
//!
//! Facade over the ledger store and the transfer engine: account creation,
//! lookup, reset, and field-validated transfers. Boundaries (HTTP, CLI) talk
//! to this type rather than to the store directly.

use std::sync::Arc;

use tracing::info;

use crate::account::{
    Account, AccountRepository, InMemoryAccountRepository, validate_account_id,
    validate_non_negative,
};
use crate::config::TransferConfig;
use crate::transfer::{
    LoggingNotifier, NotificationService, TransferCoordinator, TransferError, TransferGuard,
    TransferReceipt, TransferRequest,
};

pub struct AccountsService {
    repository: Arc<dyn AccountRepository>,
    coordinator: TransferCoordinator,
}

impl AccountsService {
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        notifier: Option<Arc<dyn NotificationService>>,
    ) -> Self {
        let coordinator = TransferCoordinator::new(repository.clone(), notifier);
        Self {
            repository,
            coordinator,
        }
    }

    /// In-memory store wired per `config`.
    pub fn from_config(config: &TransferConfig) -> Self {
        let repository: Arc<dyn AccountRepository> = Arc::new(InMemoryAccountRepository::new());
        let notifier: Option<Arc<dyn NotificationService>> = if config.notifications_enabled {
            Some(Arc::new(LoggingNotifier))
        } else {
            None
        };
        let guard = TransferGuard::new(config.lock_mode, config.lock_timeout());
        let coordinator = TransferCoordinator::new(repository.clone(), notifier)
            .with_guard(guard)
            .with_min_balance(config.min_balance)
            .with_notification_timeout(config.notification_timeout());

        info!(
            lock_mode = ?config.lock_mode,
            lock_timeout_ms = ?config.lock_timeout_ms,
            notifications = coordinator.has_notifier(),
            notification_timeout_ms = config.notification_timeout_ms,
            "Accounts service initialized"
        );
        Self {
            repository,
            coordinator,
        }
    }

    /// # Errors
    /// - `InvalidRequest` for an empty id or a negative opening balance
    /// - `DuplicateAccountId` if the id is taken
    pub async fn create_account(&self, account: Account) -> Result<(), TransferError> {
        validate_account_id("accountId", account.account_id())?;
        validate_non_negative("balance", account.balance())?;

        let account_id = account.account_id().to_string();
        self.repository.create(account).await?;
        info!(account = %account_id, "Account created");
        Ok(())
    }

    pub async fn get_account(&self, account_id: &str) -> Option<Account> {
        self.repository.get(account_id).await
    }

    /// Drop every account. Intended for tests and resets.
    pub async fn clear_accounts(&self) {
        self.repository.clear().await;
    }

    /// Validate request fields, then hand off to the transfer engine.
    pub async fn transfer_money(
        &self,
        req: &TransferRequest,
    ) -> Result<TransferReceipt, TransferError> {
        validate_account_id("fromAccountId", &req.from_account_id)?;
        validate_account_id("toAccountId", &req.to_account_id)?;
        validate_non_negative("amount", req.amount)?;

        self.coordinator.transfer(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn service() -> AccountsService {
        AccountsService::new(Arc::new(InMemoryAccountRepository::new()), None)
    }

    #[tokio::test]
    async fn test_add_account() {
        let service = service();
        let account = Account::with_balance("Id-123", Decimal::from(1000));
        service.create_account(account.clone()).await.unwrap();

        assert_eq!(service.get_account("Id-123").await, Some(account));
    }

    #[tokio::test]
    async fn test_add_account_fails_on_duplicate_id() {
        let service = service();
        let unique_id = format!("Id-{}", chrono::Utc::now().timestamp_millis());
        let account = Account::new(unique_id.clone());
        service.create_account(account.clone()).await.unwrap();

        let err = service.create_account(account).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Account id {} already exists!", unique_id)
        );
    }

    #[tokio::test]
    async fn test_create_account_validation() {
        let service = service();
        let empty = service.create_account(Account::new("")).await.unwrap_err();
        assert_eq!(empty.code(), "INVALID_REQUEST");

        let negative = service
            .create_account(Account::with_balance("Id-1", Decimal::from(-1)))
            .await
            .unwrap_err();
        assert_eq!(negative.code(), "INVALID_REQUEST");
        assert!(service.get_account("Id-1").await.is_none());
    }

    #[tokio::test]
    async fn test_transfer_money_rejects_malformed_fields() {
        let service = service();
        let err = service
            .transfer_money(&TransferRequest::new("", "Id-2", Decimal::ONE))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid request: fromAccountId must not be empty");

        let err = service
            .transfer_money(&TransferRequest::new("Id-1", "Id-2", Decimal::from(-3)))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 400);
    }

    #[tokio::test]
    async fn test_clear_accounts() {
        let service = service();
        service.create_account(Account::new("Id-1")).await.unwrap();
        service.clear_accounts().await;
        assert!(service.get_account("Id-1").await.is_none());
    }

    #[tokio::test]
    async fn test_from_config_per_account_mode() {
        let config = TransferConfig {
            lock_mode: crate::transfer::LockMode::PerAccount,
            ..TransferConfig::default()
        };
        let service = AccountsService::from_config(&config);
        service
            .create_account(Account::with_balance("A", Decimal::from(10)))
            .await
            .unwrap();
        service.create_account(Account::new("B")).await.unwrap();

        let receipt = service
            .transfer_money(&TransferRequest::new("A", "B", Decimal::from(4)))
            .await
            .unwrap();
        assert_eq!(receipt.from_balance, Decimal::from(6));
        assert_eq!(receipt.to_balance, Decimal::from(4));
    }
}
