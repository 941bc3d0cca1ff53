//! Board-level types: ColumnKey, ColumnDef, Column, Board

use super::ids::{CustomColumnId, LeadId};
use super::lead::{Lead, LeadStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which lane a column is: one keyed by a status value, or a user-defined one
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ColumnKey {
    Status(LeadStatus),
    Custom(CustomColumnId),
}

impl ColumnKey {
    /// The column id as seen by the drag layer
    pub fn id(&self) -> &str {
        match self {
            Self::Status(status) => status.as_str(),
            Self::Custom(id) => id.as_str(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A persisted custom column definition, owned by the Column Store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub id: CustomColumnId,
    pub title: String,
    #[serde(default)]
    pub order: usize,
}

impl ColumnDef {
    pub fn new(id: impl Into<CustomColumnId>, title: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            order,
        }
    }
}

/// A lane on the board with the leads placed in it, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    #[serde(flatten)]
    pub key: ColumnKey,
    pub title: String,
    /// Synthesized empty `New` lane shown when no status lane exists
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    pub leads: Vec<Lead>,
}

impl Column {
    pub fn status(status: LeadStatus) -> Self {
        Self {
            key: ColumnKey::Status(status),
            title: status.as_str().to_string(),
            fallback: false,
            leads: Vec::new(),
        }
    }

    pub fn custom(def: &ColumnDef) -> Self {
        Self {
            key: ColumnKey::Custom(def.id.clone()),
            title: def.title.clone(),
            fallback: false,
            leads: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        self.key.id()
    }

    /// Position of a lead in this column
    pub fn position_of(&self, lead: &LeadId) -> Option<usize> {
        self.leads.iter().position(|l| &l.id == lead)
    }

    pub fn lead_ids(&self) -> Vec<&str> {
        self.leads.iter().map(|l| l.id.as_str()).collect()
    }
}

/// Where a lead sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadLocation {
    pub column: usize,
    pub index: usize,
}

/// A reconciled board: status columns first, then custom columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Find a column by the id the drag layer uses
    pub fn column_by_id(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id() == id)
    }

    pub fn column(&self, key: &ColumnKey) -> Option<&Column> {
        self.columns.iter().find(|c| &c.key == key)
    }

    /// Locate a lead by id
    pub fn locate(&self, lead: &LeadId) -> Option<LeadLocation> {
        self.columns.iter().enumerate().find_map(|(column, c)| {
            c.position_of(lead)
                .map(|index| LeadLocation { column, index })
        })
    }

    pub fn lead(&self, lead: &LeadId) -> Option<&Lead> {
        self.locate(lead)
            .map(|loc| &self.columns[loc.column].leads[loc.index])
    }

    /// Total number of placed leads
    pub fn lead_count(&self) -> usize {
        self.columns.iter().map(|c| c.leads.len()).sum()
    }

    /// Move a lead within one column. Display order only.
    ///
    /// Returns false when the column or either index does not exist.
    pub fn reorder(&mut self, column_id: &str, from: usize, to: usize) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.id() == column_id) else {
            return false;
        };
        if from >= column.leads.len() || to >= column.leads.len() {
            return false;
        }
        let lead = column.leads.remove(from);
        column.leads.insert(to, lead);
        true
    }
}
