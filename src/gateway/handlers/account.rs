//! Account handlers

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, CreateAccountRequest, created, error_codes, ok};
use crate::account::Account;

/// Create account endpoint
///
/// POST /v1/accounts
pub async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateAccountRequest>,
) -> ApiResult<Account> {
    let account = Account::from(req);
    state
        .accounts
        .create_account(account.clone())
        .await
        .map_err(ApiError::from)?;
    created(account)
}

/// GET /v1/accounts/{account_id}
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> ApiResult<Account> {
    match state.accounts.get_account(&account_id).await {
        Some(account) => ok(account),
        None => ApiError::not_found(
            error_codes::ACCOUNT_NOT_FOUND,
            format!("Account {} not found", account_id),
        )
        .into_err(),
    }
}
