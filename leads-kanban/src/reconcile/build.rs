//! Column model builder: flat leads + custom definitions -> ordered columns

use crate::types::{Board, Column, ColumnDef, ColumnKey, CustomColumnId, Lead, LeadId, LeadStatus};
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Resolve the column a lead belongs in.
///
/// A custom column wins when it names a known definition. Otherwise the
/// lead's status decides (absent = `New`); a hidden status lands in `New`.
pub fn resolve_placement(
    lead: &Lead,
    custom_defs: &[ColumnDef],
    hidden: &BTreeSet<LeadStatus>,
) -> ColumnKey {
    if let Some(id) = &lead.custom_column_id {
        if custom_defs.iter().any(|def| &def.id == id) {
            return ColumnKey::Custom(id.clone());
        }
    }
    ColumnKey::Status(status_lane(lead.effective_status(), hidden))
}

fn status_lane(status: LeadStatus, hidden: &BTreeSet<LeadStatus>) -> LeadStatus {
    if hidden.contains(&status) {
        LeadStatus::New
    } else {
        status
    }
}

/// Build the board columns.
///
/// Status columns come first, in the order their status is first met among
/// the leads; custom columns follow in store order. Leads keep input order.
/// Pure: identical inputs give identical output.
pub fn build_columns(
    leads: &[Lead],
    custom_defs: &[ColumnDef],
    hidden: &BTreeSet<LeadStatus>,
) -> Vec<Column> {
    let mut custom_columns: Vec<Column> = Vec::with_capacity(custom_defs.len());
    let mut custom_index: HashMap<&CustomColumnId, usize> = HashMap::new();
    for def in custom_defs {
        if custom_index.contains_key(&def.id) {
            debug!(column = %def.id, "skipping duplicate custom column definition");
            continue;
        }
        custom_index.insert(&def.id, custom_columns.len());
        custom_columns.push(Column::custom(def));
    }

    let mut status_columns: IndexMap<LeadStatus, Vec<Lead>> = IndexMap::new();
    let mut seen: HashSet<&LeadId> = HashSet::with_capacity(leads.len());

    for lead in leads {
        if !seen.insert(&lead.id) {
            debug!(lead = %lead.id, "skipping duplicate lead in input");
            continue;
        }

        let custom = lead
            .custom_column_id
            .as_ref()
            .and_then(|id| custom_index.get(id).copied());

        match custom {
            Some(index) => custom_columns[index].leads.push(lead.clone()),
            None => {
                if let Some(id) = &lead.custom_column_id {
                    debug!(lead = %lead.id, column = %id, "custom column is gone, using status");
                }
                let lane = status_lane(lead.effective_status(), hidden);
                status_columns.entry(lane).or_default().push(lead.clone());
            }
        }
    }

    let mut columns: Vec<Column> = status_columns
        .into_iter()
        .map(|(status, leads)| Column {
            leads,
            ..Column::status(status)
        })
        .collect();

    if columns.is_empty() {
        columns.push(Column {
            fallback: true,
            ..Column::status(LeadStatus::New)
        });
    }

    columns.extend(custom_columns);
    columns
}

/// Build a full board from its three inputs
pub fn build_board(
    leads: &[Lead],
    custom_defs: &[ColumnDef],
    hidden: &BTreeSet<LeadStatus>,
) -> Board {
    Board::new(build_columns(leads, custom_defs, hidden))
}
