//! Health check handler

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::extract::State;

use super::super::state::AppState;
use super::super::types::{ApiResult, ok};

/// Health check response data
#[derive(serde::Serialize)]
pub struct HealthResponse {
    /// Server timestamp in milliseconds
    pub timestamp_ms: u64,
    pub uptime_secs: u64,
}

/// GET /v1/health
///
/// The ledger is in-process, so reachability is health.
pub async fn health_check(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    ok(HealthResponse {
        timestamp_ms: unix_millis(SystemTime::now()),
        uptime_secs: state.uptime_secs(),
    })
}

/// Milliseconds since the epoch, saturating at `u64::MAX`; 0 before the epoch.
fn unix_millis(now: SystemTime) -> u64 {
    now.duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
