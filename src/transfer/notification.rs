//! Post-transfer notifications
//!
//! The engine reports each side of a committed transfer to an optional
//! [`NotificationService`]. Delivery is fire-and-forget: errors are logged by
//! the caller and never affect the transfer outcome.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use super::types::TransferAction;
use crate::account::Account;
use crate::core_types::Amount;

/// Support line appended to every customer message
pub const DISPUTE_CONTACT: &str = "Call 18009999 for dispute.";

/// Prefix that replaces the hidden part of an account id
pub const MASK_PREFIX: &str = "XX";

const CURRENCY: &str = "INR";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Notification delivery failed: {0}")]
pub struct NotificationError(pub String);

/// Receives one message per side of a committed transfer
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify_about_transfer(
        &self,
        account: &Account,
        transfer_description: &str,
    ) -> Result<(), NotificationError>;
}

/// `XX` followed by the last three characters of the id.
///
/// Ids of three characters or fewer are shown in full after the prefix.
pub fn mask_account_id(account_id: &str) -> String {
    let len = account_id.chars().count();
    let tail: String = account_id.chars().skip(len.saturating_sub(3)).collect();
    format!("{MASK_PREFIX}{tail}")
}

/// Customer-facing description of one side of a transfer.
pub fn transfer_description(
    account_id: &str,
    amount: Amount,
    action: TransferAction,
    balance: Amount,
    date: NaiveDate,
) -> String {
    format!(
        "Dear Customer, Account {} is {} with {CURRENCY} {} on {}. \
         The Available Balance is {CURRENCY} {}. {DISPUTE_CONTACT}",
        mask_account_id(account_id),
        action,
        amount,
        date.format("%d-%b-%y"),
        balance,
    )
}

/// Writes notifications to the log instead of an external channel.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

#[async_trait]
impl NotificationService for LoggingNotifier {
    async fn notify_about_transfer(
        &self,
        account: &Account,
        transfer_description: &str,
    ) -> Result<(), NotificationError> {
        info!(
            target: "notification",
            account = %mask_account_id(account.account_id()),
            "{}",
            transfer_description
        );
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_mask_account_id() {
        assert_eq!(mask_account_id("Id-123"), "XX123");
        assert_eq!(mask_account_id("456"), "XX456");
        assert_eq!(mask_account_id("7"), "XX7");
        assert_eq!(mask_account_id(""), "XX");
    }

    #[test]
    fn test_transfer_description() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let msg = transfer_description(
            "Id-123",
            Decimal::from(500),
            TransferAction::Debited,
            Decimal::from(500),
            date,
        );
        assert_eq!(
            msg,
            "Dear Customer, Account XX123 is debited with INR 500 on 19-Oct-26. \
             The Available Balance is INR 500. Call 18009999 for dispute."
        );
    }

    #[test]
    fn test_transfer_description_keeps_scale() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let msg = transfer_description(
            "Id-456",
            Decimal::new(1050, 2),
            TransferAction::Credited,
            Decimal::new(101050, 2),
            date,
        );
        assert!(msg.contains("XX456 is credited with INR 10.50 on 05-Jan-26"));
        assert!(msg.contains("Available Balance is INR 1010.50"));
    }

    #[tokio::test]
    async fn test_logging_notifier_never_fails() {
        let account = Account::with_balance("Id-123", Decimal::from(5));
        assert!(
            LoggingNotifier
                .notify_about_transfer(&account, "hello")
                .await
                .is_ok()
        );
    }
}
