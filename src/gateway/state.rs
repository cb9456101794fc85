use std::sync::Arc;
use std::time::Instant;

use crate::service::AccountsService;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// Accounts and transfers
    pub accounts: Arc<AccountsService>,
    /// Process start, reported by the health check
    started_at: Instant,
}

impl AppState {
    pub fn new(accounts: Arc<AccountsService>) -> Self {
        Self {
            accounts,
            started_at: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
