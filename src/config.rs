use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

use crate::transfer::LockMode;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

/// Transfer engine settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransferConfig {
    #[serde(default)]
    pub lock_mode: LockMode,
    /// Unbounded wait when absent
    #[serde(default)]
    pub lock_timeout_ms: Option<u64>,
    #[serde(default = "default_notifications_enabled")]
    pub notifications_enabled: bool,
    /// Bound on a single notifier call
    #[serde(default = "default_notification_timeout_ms")]
    pub notification_timeout_ms: u64,
    /// Source balance must be strictly above this
    #[serde(default)]
    pub min_balance: Decimal,
}

fn default_notifications_enabled() -> bool {
    true
}

fn default_notification_timeout_ms() -> u64 {
    5_000
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            lock_mode: LockMode::Global,
            lock_timeout_ms: None,
            notifications_enabled: default_notifications_enabled(),
            notification_timeout_ms: default_notification_timeout_ms(),
            min_balance: Decimal::ZERO,
        }
    }
}

impl TransferConfig {
    pub fn lock_timeout(&self) -> Option<Duration> {
        self.lock_timeout_ms.map(Duration::from_millis)
    }

    pub fn notification_timeout(&self) -> Duration {
        Duration::from_millis(self.notification_timeout_ms)
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Result<Self, ConfigError> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }
}
