//! Transfer Error Types
//!
//! Every failure is reported once to the immediate caller; nothing here is retried.

use std::time::Duration;

use thiserror::Error;

use crate::account::{RepositoryError, ValidationError};

/// Fixed user-facing message for a rejected debit.
pub const INSUFFICIENT_BALANCE: &str =
    "Dear Customer, you do not have sufficient amount to transfer.";

/// Transfer error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // === Account Errors ===
    /// Ids are listed source first, then destination.
    #[error("Dear Customer, Account {} does not exists.", .0.join(", "))]
    AccountNotFound(Vec<String>),

    #[error("Account id {0} already exists!")]
    DuplicateAccountId(String),

    #[error("{}", INSUFFICIENT_BALANCE)]
    InsufficientBalance,

    // === Concurrency Errors ===
    #[error("Timed out after {0:?} waiting for the transfer lock")]
    LockTimeout(Duration),

    // === System Errors ===
    /// A store write failed; no net change to either account.
    #[error("Storage error: {0}")]
    Storage(String),

    /// The debit was persisted, the credit was not, and restoring the debit failed.
    #[error("Ledger inconsistent: debit on {from} persisted without credit on {to}")]
    LedgerInconsistent { from: String, to: String },

    /// The task running the critical section panicked or was cancelled by runtime shutdown.
    #[error("Transfer task aborted: {0}")]
    Aborted(String),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidRequest(_) => "INVALID_REQUEST",
            TransferError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            TransferError::DuplicateAccountId(_) => "DUPLICATE_ACCOUNT_ID",
            TransferError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            TransferError::LockTimeout(_) => "LOCK_TIMEOUT",
            TransferError::Storage(_) => "STORAGE_ERROR",
            TransferError::LedgerInconsistent { .. } => "LEDGER_INCONSISTENT",
            TransferError::Aborted(_) => "TRANSFER_ABORTED",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidRequest(_) => 400,
            TransferError::AccountNotFound(_) => 404,
            TransferError::DuplicateAccountId(_) => 409,
            TransferError::InsufficientBalance => 422,
            TransferError::LockTimeout(_) => 503,
            TransferError::Storage(_)
            | TransferError::LedgerInconsistent { .. }
            | TransferError::Aborted(_) => 500,
        }
    }
}

impl From<RepositoryError> for TransferError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::DuplicateAccountId(id) => TransferError::DuplicateAccountId(id),
            other => TransferError::Storage(other.to_string()),
        }
    }
}

impl From<ValidationError> for TransferError {
    fn from(e: ValidationError) -> Self {
        TransferError::InvalidRequest(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            TransferError::InsufficientBalance.code(),
            "INSUFFICIENT_BALANCE"
        );
        assert_eq!(
            TransferError::AccountNotFound(vec!["x".into()]).code(),
            "ACCOUNT_NOT_FOUND"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(TransferError::AccountNotFound(vec![]).http_status(), 404);
        assert_eq!(TransferError::InsufficientBalance.http_status(), 422);
        assert_eq!(TransferError::DuplicateAccountId("a".into()).http_status(), 409);
        assert_eq!(
            TransferError::LockTimeout(Duration::from_millis(5)).http_status(),
            503
        );
        assert_eq!(TransferError::Storage("disk".into()).http_status(), 500);
        let aborted = TransferError::Aborted("task panicked".into());
        assert_eq!(aborted.http_status(), 500);
        assert_eq!(aborted.code(), "TRANSFER_ABORTED");
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransferError::InsufficientBalance.to_string(),
            INSUFFICIENT_BALANCE
        );
        assert_eq!(
            TransferError::AccountNotFound(vec!["Id-999".into()]).to_string(),
            "Dear Customer, Account Id-999 does not exists."
        );
        assert_eq!(
            TransferError::AccountNotFound(vec!["A".into(), "B".into()]).to_string(),
            "Dear Customer, Account A, B does not exists."
        );
    }

    #[test]
    fn test_from_repository_error() {
        let dup: TransferError = RepositoryError::DuplicateAccountId("Id-1".into()).into();
        assert_eq!(dup, TransferError::DuplicateAccountId("Id-1".into()));

        let write: TransferError = RepositoryError::Write {
            account_id: "Id-1".into(),
            reason: "disk full".into(),
        }
        .into();
        assert_eq!(write.code(), "STORAGE_ERROR");
    }
}
