//! Core types for the lead board

mod column;
mod ids;
mod lead;
mod log;
mod report;

pub use column::{Board, Column, ColumnDef, ColumnKey, LeadLocation};
pub use ids::{CustomColumnId, LeadId, LogEntryId, CUSTOM_COLUMN_PREFIX};
pub use lead::{FieldUpdate, FollowUp, Lead, LeadPatch, LeadStatus, UnknownStatus};
pub use log::LogEntry;
pub use report::{BatchReport, FailedReassignment};
