//! HTTP gateway
//!
//! Thin axum boundary over [`AccountsService`]:
//!
//! | Method | Path                    | Handler                     |
//! |--------|-------------------------|-----------------------------|
//! | POST   | `/v1/accounts`          | [`handlers::create_account`] |
//! | GET    | `/v1/accounts/{id}`     | [`handlers::get_account`]    |
//! | PUT    | `/v1/accounts/transfer` | [`handlers::transfer_money`] |
//! | GET    | `/v1/health`            | [`handlers::health_check`]   |

pub mod handlers;
pub mod state;
pub mod types;

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use crate::service::AccountsService;
use state::AppState;

/// Build the router. Exposed separately from [`run_server`] so tests can drive it in-process.
pub fn router(accounts: Arc<AccountsService>) -> Router {
    let state = Arc::new(AppState::new(accounts));

    Router::new()
        .route("/v1/health", get(handlers::health_check))
        .route("/v1/accounts", post(handlers::create_account))
        // Static segment takes priority over the capture below
        .route("/v1/accounts/transfer", put(handlers::transfer_money))
        .route("/v1/accounts/{account_id}", get(handlers::get_account))
        .with_state(state)
}

/// Bind and serve until the process exits.
pub async fn run_server(
    host: &str,
    port: u16,
    accounts: Arc<AccountsService>,
) -> std::io::Result<()> {
    let app = router(accounts);

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Gateway listening on http://{}", addr);
    info!("Accounts API: /v1/accounts/*");

    axum::serve(listener, app).await
}
