//! Gateway types module
//!
//! ## Input Types
//! - [`StrictAmount`]: Format-validated, non-negative amount
//! - [`CreateAccountRequest`], [`TransferBody`]: request bodies
//!
//! ## Output Types
//! - [`ApiResponse<T>`]: Unified API response wrapper
//! - [`ApiError`]: Error rendered in the same envelope

pub mod money;
pub mod response;

use serde::Deserialize;

use crate::account::Account;
use crate::transfer::TransferRequest;

// Re-export commonly used types at module root
pub use money::{StrictAmount, deserialize_non_empty_string};
pub use response::{ApiError, ApiResponse, ApiResult, created, error_codes, ok};

/// POST /v1/accounts body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub account_id: String,
    /// Opening balance, zero when omitted
    #[serde(default)]
    pub balance: Option<StrictAmount>,
}

impl From<CreateAccountRequest> for Account {
    fn from(req: CreateAccountRequest) -> Self {
        Account::with_balance(
            req.account_id,
            req.balance.map(StrictAmount::inner).unwrap_or_default(),
        )
    }
}

/// PUT /v1/accounts/transfer body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub from_account_id: String,
    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub to_account_id: String,
    pub amount: StrictAmount,
}

impl From<TransferBody> for TransferRequest {
    fn from(body: TransferBody) -> Self {
        TransferRequest::new(body.from_account_id, body.to_account_id, body.amount.inner())
    }
}
