//! Error types for the lead board

use crate::reconcile::{LifecycleError, ResolutionError};
use crate::store::StoreError;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// A drag referenced a lead or column the board does not know about
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A column could not be added or deleted
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    /// A store call failed after a valid local computation
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    /// Invalid field value in an operation's input
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether the board must be re-synced from the stores after this error.
    ///
    /// Local rejections never touched a store, so the board is still valid.
    pub fn requires_resync(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Persistence(StoreError::Network { .. }))
    }
}
