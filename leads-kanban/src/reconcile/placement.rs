//! Placement resolver: a drag-and-drop gesture -> lead mutation or local reorder

use crate::types::{Board, ColumnKey, LeadId, LeadPatch};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// A drop that cannot be resolved against the current board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("lead not found on board: {id}")]
    LeadNotFound { id: String },

    #[error("drop target not found on board: {id}")]
    TargetNotFound { id: String },
}

/// What a drop means for the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum MoveResult {
    /// Nothing changes and nothing is persisted
    NoOp,

    /// Display order change inside one column. Never persisted.
    Reorder {
        column: ColumnKey,
        from: usize,
        to: usize,
    },

    /// The lead changes column; `patch` holds exactly the changed fields
    Reassign {
        lead: LeadId,
        from: ColumnKey,
        to: ColumnKey,
        patch: LeadPatch,
    },
}

impl MoveResult {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }
}

/// The update that places a lead in `destination`.
///
/// Custom columns leave the status alone; status columns always take the lead
/// off its custom column.
pub fn patch_for(destination: &ColumnKey) -> LeadPatch {
    match destination {
        ColumnKey::Custom(id) => LeadPatch::to_custom_column(id.clone()),
        ColumnKey::Status(status) => LeadPatch::to_status(*status),
    }
}

/// Resolve a drop of `active` onto `target`.
///
/// `target` is the id under the pointer when the drag ended: a column id, a
/// lead id, or nothing when the lead was dropped outside any lane. Column ids
/// are matched before lead ids.
pub fn resolve_move(
    active: &LeadId,
    target: Option<&str>,
    board: &Board,
) -> Result<MoveResult, ResolutionError> {
    let Some(target) = target else {
        return Ok(MoveResult::NoOp);
    };
    if active.as_str() == target {
        return Ok(MoveResult::NoOp);
    }

    let source = board
        .locate(active)
        .ok_or_else(|| ResolutionError::LeadNotFound {
            id: active.to_string(),
        })?;
    let source_key = board.columns[source.column].key.clone();

    let (destination, over_lead) = match board.column_by_id(target) {
        Some(column) => (column.key.clone(), None),
        None => {
            let over = board.locate(&LeadId::from(target)).ok_or_else(|| {
                ResolutionError::TargetNotFound {
                    id: target.to_string(),
                }
            })?;
            (board.columns[over.column].key.clone(), Some(over.index))
        }
    };

    if destination == source_key {
        return Ok(match over_lead {
            Some(to) => {
                debug!(lead = %active, column = %source_key, from = source.index, to, "reorder within column");
                MoveResult::Reorder {
                    column: source_key,
                    from: source.index,
                    to,
                }
            }
            None => MoveResult::NoOp,
        });
    }

    debug!(lead = %active, from = %source_key, to = %destination, "reassign lead");
    Ok(MoveResult::Reassign {
        lead: active.clone(),
        patch: patch_for(&destination),
        from: source_key,
        to: destination,
    })
}
