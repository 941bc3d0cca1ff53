//! Outcome of a best-effort batch of lead reassignments

use super::ids::LeadId;
use serde::Serialize;

/// A reassignment the store rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedReassignment {
    pub lead: LeadId,
    pub error: String,
}

/// Aggregate result of evacuating a column. Successful updates are never rolled back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: Vec<FailedReassignment>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    /// True when every reassignment was persisted
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
