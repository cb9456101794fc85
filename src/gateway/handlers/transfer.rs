//! Transfer handler

use std::sync::Arc;

use axum::{Json, extract::State};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, TransferBody, ok};
use crate::transfer::{TransferReceipt, TransferRequest};

/// Transfer money between two accounts
///
/// PUT /v1/accounts/transfer
///
/// Field format (non-empty ids, non-negative amount) is enforced while the
/// body is deserialized; sufficiency and existence are the engine's call.
pub async fn transfer_money(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TransferBody>,
) -> ApiResult<TransferReceipt> {
    let req = TransferRequest::from(body);
    match state.accounts.transfer_money(&req).await {
        Ok(receipt) => ok(receipt),
        Err(e) => {
            tracing::debug!(code = e.code(), "Transfer request failed");
            ApiError::from(e).into_err()
        }
    }
}
