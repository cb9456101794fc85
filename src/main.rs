//! Transfer Ledger - HTTP entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌─────────────────┐    ┌──────────────┐
//! │  Config  │───▶│ Gateway  │───▶│ AccountsService │───▶│ Transfer     │
//! │  (YAML)  │    │  (axum)  │    │ (validation)    │    │ Coordinator  │
//! └──────────┘    └──────────┘    └─────────────────┘    └──────────────┘
//! ```
//!
//! Usage: `transfer_ledger [--env dev|prod] [--port N]`

use std::sync::Arc;

use anyhow::Context;

use transfer_ledger::config::AppConfig;
use transfer_ledger::service::AccountsService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config =
        AppConfig::load(&env).with_context(|| format!("loading configuration for {}", env))?;
    let _log_guard = transfer_ledger::logging::init_logging(&app_config);

    tracing::info!("Starting transfer ledger in {} mode", env);

    let accounts = Arc::new(AccountsService::from_config(&app_config.transfer));

    let gateway_config = &app_config.gateway;
    let port = get_port_override().unwrap_or(gateway_config.port);

    transfer_ledger::gateway::run_server(&gateway_config.host, port, accounts)
        .await
        .with_context(|| format!("serving on {}:{}", gateway_config.host, port))
}
