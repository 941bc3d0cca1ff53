//! Failures of a `leads` invocation
//!
//! Board, store and configuration errors are wrapped with a line saying what
//! the command was doing. The wrapped error stays reachable so `full_chain`
//! can print every cause under it.

use std::error::Error;
use std::fmt;

use crate::exit_codes::{EXIT_ERROR, EXIT_SUCCESS};
use leads_kanban::KanbanError;

pub type CliResult<T> = Result<T, CliError>;

/// A failed command: what to tell the user and which code to exit with
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: i32,
    pub source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// A failure with no underlying cause
    pub fn new(message: impl Into<String>, exit_code: i32) -> Self {
        Self {
            message: message.into(),
            exit_code,
            source: None,
        }
    }

    /// Wrap an error with a message describing what was being done
    pub fn with_context(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            exit_code: EXIT_ERROR,
            source: Some(source.into()),
        }
    }

    /// The message followed by one `Caused by:` line per underlying error
    pub fn full_chain(&self) -> String {
        let mut result = self.message.clone();

        let mut current_source = self.source();
        while let Some(err) = current_source {
            result.push_str(&format!("\n  Caused by: {err}"));
            current_source = err.source();
        }

        result
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl CliError {
    /// Wrap the error of a command that writes to the lead store
    pub fn from_mutation(error: KanbanError) -> Self {
        match &error {
            KanbanError::Persistence(_) => {
                Self::with_context("The lead store rejected the change", error)
            }
            _ => Self::from(error),
        }
    }
}

impl From<KanbanError> for CliError {
    fn from(error: KanbanError) -> Self {
        let message = match &error {
            KanbanError::Persistence(_) => "The lead store request failed".to_string(),
            other => other.to_string(),
        };
        Self::with_context(message, error)
    }
}

impl From<leads_kanban::StoreError> for CliError {
    fn from(error: leads_kanban::StoreError) -> Self {
        Self::with_context("Could not set up the lead store", error)
    }
}

impl From<leads_config::ConfigError> for CliError {
    fn from(error: leads_config::ConfigError) -> Self {
        Self::with_context("Could not load configuration", error)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        Self::with_context(error.to_string(), error)
    }
}

/// The exit code for a finished command, logging the cause chain of a failure.
///
/// A failure never exits with `EXIT_SUCCESS`.
pub fn handle_cli_result(result: CliResult<i32>) -> i32 {
    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Error: {}", e.full_chain());
            if e.exit_code == EXIT_SUCCESS {
                EXIT_ERROR
            } else {
                e.exit_code
            }
        }
    }
}
