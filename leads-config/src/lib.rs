//! Lead board configuration using Figment
//!
//! # Sources
//!
//! Configuration is merged from, lowest precedence first:
//!
//! - Defaults
//! - Global: `~/.leads/leads.{toml,yaml,yml,json}`
//! - Project: `./.leads/leads.{toml,yaml,yml,json}`
//! - An explicit file passed to [`load_configuration`]
//! - Environment variables prefixed `LEADS_`, with `__` between nested keys
//!   (`LEADS_STORE__BASE_URL`, `LEADS_BOARD__REASSIGN_CONCURRENCY`)
//!
//! ## Example TOML Configuration
//!
//! ```toml
//! actor = "sales@acme"
//!
//! [store]
//! base_url = "https://jobs.example.com/api"
//! token = "..."
//! timeout_secs = 30
//!
//! [board]
//! reassign_concurrency = 4
//! persist_hidden_statuses = true
//! ```
//!
//! ```no_run
//! let config = leads_config::load_configuration(None)?;
//! println!("{:?}", config.store.base_url);
//! # Ok::<(), leads_config::ConfigError>(())
//! ```

pub mod discovery;
mod error;
mod provider;
mod types;

pub use discovery::{ConfigFile, ConfigFormat, ConfigScope, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::{load_configuration, ConfigProvider, ENV_PREFIX};
pub use types::{
    BoardConfig, LeadsConfig, StoreConfig, DEFAULT_REASSIGN_CONCURRENCY, DEFAULT_TIMEOUT_SECS,
};
