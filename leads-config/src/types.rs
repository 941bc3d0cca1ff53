//! Configuration data structures

use crate::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Default request timeout for the HTTP store
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of concurrent lead updates while deleting a column
pub use leads_kanban::DEFAULT_REASSIGN_CONCURRENCY;

/// Complete lead board configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsConfig {
    /// Who performed logged operations, e.g. `sales@acme`
    pub actor: Option<String>,
    pub store: StoreConfig,
    pub board: BoardConfig,
}

/// Where leads and columns are stored
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// REST API root, e.g. `https://jobs.example.com/api`
    pub base_url: Option<String>,
    /// Bearer token for the API
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl StoreConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The base URL, or a validation error when none is configured
    pub fn require_base_url(&self) -> ConfigResult<&str> {
        self.base_url.as_deref().ok_or_else(|| {
            ConfigError::validation(
                "store.base_url is not set (use a config file or LEADS_STORE__BASE_URL)",
            )
        })
    }
}

/// Board behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Lead updates in flight while evacuating a deleted column
    pub reassign_concurrency: usize,
    /// Keep deleted status lanes in the Column Store rather than per session
    pub persist_hidden_statuses: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            reassign_concurrency: DEFAULT_REASSIGN_CONCURRENCY,
            persist_hidden_statuses: false,
        }
    }
}

impl LeadsConfig {
    /// Check values figment cannot check by type alone
    pub fn validate(&self) -> ConfigResult<()> {
        if self.board.reassign_concurrency == 0 {
            return Err(ConfigError::invalid_value(
                "board.reassign_concurrency",
                "must be at least 1",
            ));
        }
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "store.timeout_secs",
                "must be at least 1",
            ));
        }
        if let Some(base_url) = &self.store.base_url {
            let parsed = url::Url::parse(base_url)
                .map_err(|e| ConfigError::invalid_value("store.base_url", e.to_string()))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::invalid_value(
                    "store.base_url",
                    format!("unsupported scheme '{}'", parsed.scheme()),
                ));
            }
        }
        Ok(())
    }
}
