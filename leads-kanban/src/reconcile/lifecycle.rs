//! Column lifecycle: validating new columns and planning column deletion

use crate::types::{
    Board, Column, ColumnDef, ColumnKey, CustomColumnId, LeadId, LeadPatch, LeadStatus,
};
use serde::Serialize;
use thiserror::Error;

/// A column add or delete rejected before any store call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("column title must not be empty")]
    EmptyColumnTitle,

    #[error("a column titled '{title}' already exists")]
    DuplicateColumnTitle { title: String },

    #[error("column not found: {id}")]
    ColumnNotFound { id: String },
}

/// A validated new column and the full definition list to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewColumnPlan {
    pub column: ColumnDef,
    pub definitions: Vec<ColumnDef>,
}

/// Validate `title` against the board and append a new definition.
pub fn plan_new_column(
    title: &str,
    columns: &[Column],
    custom_defs: &[ColumnDef],
) -> Result<NewColumnPlan, LifecycleError> {
    plan_new_column_with(title, columns, custom_defs, CustomColumnId::generate)
}

/// Same as [`plan_new_column`] with a caller-supplied id generator.
///
/// Generated ids that collide with a status value or any existing column id
/// are discarded and the generator is asked again.
pub fn plan_new_column_with(
    title: &str,
    columns: &[Column],
    custom_defs: &[ColumnDef],
    mut generate: impl FnMut() -> CustomColumnId,
) -> Result<NewColumnPlan, LifecycleError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(LifecycleError::EmptyColumnTitle);
    }

    let wanted = title.to_lowercase();
    let duplicate = columns
        .iter()
        .map(|c| c.title.as_str())
        .chain(custom_defs.iter().map(|d| d.title.as_str()))
        .any(|existing| existing.trim().to_lowercase() == wanted);
    if duplicate {
        return Err(LifecycleError::DuplicateColumnTitle {
            title: title.to_string(),
        });
    }

    let taken = |id: &CustomColumnId| {
        LeadStatus::ALL.iter().any(|s| s.as_str() == id.as_str())
            || columns.iter().any(|c| c.id() == id.as_str())
            || custom_defs.iter().any(|d| &d.id == id)
    };
    let id = loop {
        let candidate = generate();
        if !taken(&candidate) {
            break candidate;
        }
    };

    let order = custom_defs
        .iter()
        .map(|d| d.order)
        .max()
        .map(|o| o + 1)
        .unwrap_or(0);

    let column = ColumnDef {
        id,
        title: title.to_string(),
        order,
    };
    let mut definitions = custom_defs.to_vec();
    definitions.push(column.clone());

    Ok(NewColumnPlan {
        column,
        definitions,
    })
}

/// One lead update issued while evacuating a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reassignment {
    pub lead: LeadId,
    pub patch: LeadPatch,
}

/// What deleting a column requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionPlan {
    /// The synthesized `New` lane stays; nothing happens
    KeepFallback,

    /// Clear the custom placement of its leads, then delete the definition
    Custom {
        id: CustomColumnId,
        reassignments: Vec<Reassignment>,
    },

    /// Move its leads to `New`, then hide the status lane
    Status {
        status: LeadStatus,
        reassignments: Vec<Reassignment>,
    },
}

impl DeletionPlan {
    pub fn reassignments(&self) -> &[Reassignment] {
        match self {
            Self::KeepFallback => &[],
            Self::Custom { reassignments, .. } | Self::Status { reassignments, .. } => {
                reassignments
            }
        }
    }
}

/// Plan the deletion of the column with the given id.
pub fn plan_deletion(column_id: &str, board: &Board) -> Result<DeletionPlan, LifecycleError> {
    let column = board
        .column_by_id(column_id)
        .ok_or_else(|| LifecycleError::ColumnNotFound {
            id: column_id.to_string(),
        })?;

    if column.fallback {
        return Ok(DeletionPlan::KeepFallback);
    }

    Ok(match &column.key {
        ColumnKey::Custom(id) => DeletionPlan::Custom {
            id: id.clone(),
            reassignments: column
                .leads
                .iter()
                .map(|lead| Reassignment {
                    lead: lead.id.clone(),
                    patch: LeadPatch::clear_custom_column(),
                })
                .collect(),
        },
        ColumnKey::Status(status) => DeletionPlan::Status {
            status: *status,
            reassignments: column
                .leads
                .iter()
                .filter(|lead| {
                    lead.effective_status() != LeadStatus::New || lead.custom_column_id.is_some()
                })
                .map(|lead| Reassignment {
                    lead: lead.id.clone(),
                    patch: LeadPatch::to_status(LeadStatus::New),
                })
                .collect(),
        },
    })
}
