//! Store contracts consumed by the board
//!
//! The Leads Store and Column Store own the data; the board only reads them
//! and issues updates. Two implementations ship with the crate:
//!
//! - [`MemoryStore`] keeps everything in process, for tests and demos.
//! - [`HttpStore`] talks JSON over HTTP to the job board's REST API.

mod http;
mod memory;

pub use http::{HttpStore, HttpStoreOptions};
pub use memory::{MemoryStore, StoreSeed};

use crate::types::{ColumnDef, CustomColumnId, Lead, LeadId, LeadPatch, LeadStatus};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for store calls
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A store call that failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not found: {id}")]
    NotFound { id: String },

    #[error("unauthorized")]
    Unauthorized,

    #[error("validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("network error: {message}")]
    Network { message: String },
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationFailed {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }
}

/// The lead collection visible to the current actor
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// All leads, in fetch order
    async fn fetch_all(&self) -> StoreResult<Vec<Lead>>;

    /// Apply a partial update and return the stored lead
    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> StoreResult<Lead>;

    async fn delete(&self, id: &LeadId) -> StoreResult<()>;
}

/// Custom column definitions (and board settings) for the current actor
#[async_trait]
pub trait ColumnStore: Send + Sync {
    /// Definitions in store order
    async fn fetch_custom_columns(&self) -> StoreResult<Vec<ColumnDef>>;

    /// Replace the whole definition list
    async fn replace_custom_columns(&self, columns: &[ColumnDef]) -> StoreResult<()>;

    async fn delete_custom_column(&self, id: &CustomColumnId) -> StoreResult<()>;

    /// Status lanes the user deleted. Stores without board settings keep none.
    async fn fetch_hidden_statuses(&self) -> StoreResult<Vec<LeadStatus>> {
        Ok(Vec::new())
    }

    /// Persist the deleted status lanes. Stores without board settings ignore it.
    async fn replace_hidden_statuses(&self, _hidden: &[LeadStatus]) -> StoreResult<()> {
        Ok(())
    }
}
