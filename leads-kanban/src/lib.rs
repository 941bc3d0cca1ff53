//! Lead kanban board reconciler
//!
//! This crate turns a flat list of sales leads into a kanban board and keeps
//! the board consistent with the stores that own the data.
//!
//! ## Overview
//!
//! - **Status and custom lanes** - Leads sit in the lane of their status unless
//!   they are assigned to a user-defined custom column
//! - **Stores are the source of truth** - Every persisted change is followed by
//!   a rebuild from the [`LeadStore`] and [`ColumnStore`]
//! - **Pure reconciliation** - Building columns and resolving drops happen in
//!   [`reconcile`] without I/O
//! - **Audited mutations** - Operations run through a processor that records
//!   an activity log
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use leads_kanban::{
//!     board::GetBoard, lead::MoveLead, BoardContext, BoardOperationProcessor, MemoryStore,
//!     OperationProcessor,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryStore::from_json(
//!     r#"{"leads": [{"_id": "1"}, {"_id": "2", "status": "Contacted"}]}"#,
//! )?);
//! let ctx = BoardContext::from_store(store);
//! let processor = BoardOperationProcessor::with_actor("sales@acme");
//!
//! let board = processor.process(&GetBoard, &ctx).await?;
//! println!("{} columns", board["columns"].as_array().map_or(0, Vec::len));
//!
//! processor.process(&MoveLead::new("1", "Contacted"), &ctx).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod operation;
mod processor;
pub mod reconcile;
mod sequencer;
pub mod store;
pub mod types;

// Command modules
pub mod board;
pub mod column;
pub mod lead;

pub use context::{BoardContext, DEFAULT_REASSIGN_CONCURRENCY};
pub use error::{KanbanError, Result};
pub use operation::{Execute, ExecutionResult, Operation, OperationProcessor};
pub use processor::BoardOperationProcessor;
pub use sequencer::LeadUpdateSequencer;
pub use store::{
    ColumnStore, HttpStore, HttpStoreOptions, LeadStore, MemoryStore, StoreError, StoreResult,
    StoreSeed,
};

// Re-export commonly used types
pub use types::{
    BatchReport, Board, Column, ColumnDef, ColumnKey, CustomColumnId, Lead, LeadId, LeadPatch,
    LeadStatus, LogEntry,
};

pub use async_trait::async_trait;
