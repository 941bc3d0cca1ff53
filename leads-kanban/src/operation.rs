//! Operation traits and execution results
//!
//! Operations are structs where the fields ARE the parameters. Each one
//! implements [`Operation`] for its metadata (usually via [`operation!`]) and
//! [`Execute`] for its behavior.
//!
//! ```ignore
//! operation!(AddColumn, verb = "add", noun = "column", description = "Add a custom column");
//!
//! #[async_trait]
//! impl Execute<BoardContext, KanbanError> for AddColumn {
//!     async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
//!         // returns ExecutionResult::Logged for mutations, Unlogged for reads
//!     }
//! }
//! ```

use crate::error::KanbanError;
use crate::types::LogEntry;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;

/// Metadata every operation carries
pub trait Operation {
    fn verb(&self) -> &'static str;
    fn noun(&self) -> &'static str;
    fn description(&self) -> &'static str;

    /// Canonical op string, e.g. "move lead"
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }
}

/// Implement [`Operation`] for a struct
#[macro_export]
macro_rules! operation {
    ($ty:ty, verb = $verb:literal, noun = $noun:literal, description = $desc:literal) => {
        impl $crate::Operation for $ty {
            fn verb(&self) -> &'static str {
                $verb
            }
            fn noun(&self) -> &'static str {
                $noun
            }
            fn description(&self) -> &'static str {
                $desc
            }
        }
    };
}

/// Run an operation against a context
#[async_trait]
pub trait Execute<C: Sync, E>: Operation + Send + Sync {
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

/// Runs operations and records what they did
#[async_trait]
pub trait OperationProcessor<C: Sync, E> {
    async fn process<T>(&self, operation: &T, ctx: &C) -> Result<Value, E>
    where
        T: Execute<C, E> + Send + Sync;

    /// Record a log entry produced by an operation
    async fn write_log(&self, ctx: &C, log_entry: &LogEntry) -> Result<(), E>;
}

/// What an operation produced, and whether it belongs in the activity log.
///
/// Store writes (moves, column changes, lead deletions) come back `Logged`.
/// Board reads, local reorders and no-op drops come back `Unlogged`. A
/// failed write still carries its entry; a failed read carries none.
pub enum ExecutionResult<T, E> {
    Logged { value: T, log_entry: LogEntry },
    Unlogged { value: T },
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Drop the activity entry and keep the outcome
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// The outcome plus the activity entry to append, if any
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Whether an activity entry will be appended
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

/// Wrap the outcome of a mutating operation, logging success and failure alike
pub(crate) fn logged<O: Operation + ?Sized>(
    op: &O,
    input: Value,
    start: Instant,
    result: Result<Value, KanbanError>,
) -> ExecutionResult<Value, KanbanError> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match result {
        Ok(value) => ExecutionResult::Logged {
            log_entry: LogEntry::success(op.op_string(), input, value.clone(), duration_ms),
            value,
        },
        Err(error) => {
            let log_entry = LogEntry::failure(op.op_string(), input, &error.to_string(), duration_ms);
            ExecutionResult::Failed {
                error,
                log_entry: Some(log_entry),
            }
        }
    }
}

/// Wrap the outcome of a read or local-only operation
pub(crate) fn unlogged(result: Result<Value, KanbanError>) -> ExecutionResult<Value, KanbanError> {
    match result {
        Ok(value) => ExecutionResult::Unlogged { value },
        Err(error) => ExecutionResult::Failed {
            error,
            log_entry: None,
        },
    }
}
