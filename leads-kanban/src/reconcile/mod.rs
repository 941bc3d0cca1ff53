//! Board reconciliation: pure functions from store data to board view
//!
//! - [`build_columns`] derives the lanes from leads, custom column definitions
//!   and the hidden status set.
//! - [`resolve_move`] turns a drag gesture into a reassignment, a local reorder
//!   or nothing.
//! - [`plan_new_column`] and [`plan_deletion`] decide what adding or deleting a
//!   column means before any store is touched.
//!
//! None of these suspend or perform I/O; the operations in [`crate::column`]
//! and [`crate::lead`] apply their results to the stores.

mod build;
mod lifecycle;
mod placement;

pub use build::{build_board, build_columns, resolve_placement};
pub use lifecycle::{
    plan_deletion, plan_new_column, plan_new_column_with, DeletionPlan, LifecycleError,
    NewColumnPlan, Reassignment,
};
pub use placement::{patch_for, resolve_move, MoveResult, ResolutionError};
