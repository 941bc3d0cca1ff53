//! Property-based tests for board reconciliation

use leads_kanban::reconcile::{build_columns, resolve_move, resolve_placement, MoveResult};
use leads_kanban::types::{Board, ColumnDef, ColumnKey, FieldUpdate, Lead, LeadStatus};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};

/// Strategy for a lead's stored status, including "absent"
fn status_strategy() -> impl Strategy<Value = Option<LeadStatus>> {
    prop::option::of(prop::sample::select(LeadStatus::ALL.to_vec()))
}

/// Custom column references, some of which may not exist
fn column_ref_strategy() -> impl Strategy<Value = Option<&'static str>> {
    prop::option::of(prop::sample::select(vec![
        "custom-hot",
        "custom-cold",
        "custom-gone",
    ]))
}

/// Leads with unique ids and random placement fields
fn leads_strategy() -> impl Strategy<Value = Vec<Lead>> {
    prop::collection::vec((status_strategy(), column_ref_strategy()), 0..40).prop_map(|fields| {
        fields
            .into_iter()
            .enumerate()
            .map(|(i, (status, column))| {
                let mut lead = Lead::new(format!("lead-{i}"));
                lead.status = status;
                lead.custom_column_id = column.map(Into::into);
                lead
            })
            .collect()
    })
}

fn defs_strategy() -> impl Strategy<Value = Vec<ColumnDef>> {
    prop::sample::subsequence(
        vec![
            ColumnDef::new("custom-hot", "Hot Leads", 0),
            ColumnDef::new("custom-cold", "Cold", 1),
        ],
        0..=2,
    )
}

fn hidden_strategy() -> impl Strategy<Value = BTreeSet<LeadStatus>> {
    prop::collection::btree_set(prop::sample::select(LeadStatus::ALL.to_vec()), 0..4)
}

proptest! {
    #[test]
    fn test_every_lead_in_exactly_one_column(
        leads in leads_strategy(),
        defs in defs_strategy(),
        hidden in hidden_strategy(),
    ) {
        let columns = build_columns(&leads, &defs, &hidden);

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for column in &columns {
            for lead in &column.leads {
                *seen.entry(lead.id.as_str()).or_default() += 1;
            }
        }
        prop_assert_eq!(seen.len(), leads.len());
        prop_assert!(seen.values().all(|&count| count == 1));
    }

    #[test]
    fn test_build_is_idempotent(
        leads in leads_strategy(),
        defs in defs_strategy(),
        hidden in hidden_strategy(),
    ) {
        prop_assert_eq!(
            build_columns(&leads, &defs, &hidden),
            build_columns(&leads, &defs, &hidden)
        );
    }

    #[test]
    fn test_leads_sit_where_placement_says(
        leads in leads_strategy(),
        defs in defs_strategy(),
        hidden in hidden_strategy(),
    ) {
        let board = Board::new(build_columns(&leads, &defs, &hidden));

        for lead in &leads {
            let expected = resolve_placement(lead, &defs, &hidden);
            let location = board.locate(&lead.id).unwrap();
            prop_assert_eq!(&board.columns[location.column].key, &expected);

            let known_custom = lead
                .custom_column_id
                .as_ref()
                .filter(|id| defs.iter().any(|d| &d.id == *id));
            let placed = match known_custom {
                Some(id) => ColumnKey::Custom(id.clone()),
                None if hidden.contains(&lead.effective_status()) => {
                    ColumnKey::Status(LeadStatus::New)
                }
                None => ColumnKey::Status(lead.effective_status()),
            };
            prop_assert_eq!(expected, placed);
        }
    }

    #[test]
    fn test_column_layout(
        leads in leads_strategy(),
        defs in defs_strategy(),
        hidden in hidden_strategy(),
    ) {
        let columns = build_columns(&leads, &defs, &hidden);

        let first_custom = columns
            .iter()
            .position(|c| c.key.is_custom())
            .unwrap_or(columns.len());
        prop_assert!(columns[first_custom..].iter().all(|c| c.key.is_custom()));
        prop_assert!(first_custom >= 1);

        let custom_ids: Vec<&str> = columns[first_custom..].iter().map(|c| c.id()).collect();
        let def_ids: Vec<&str> = defs.iter().map(|d| d.id.as_str()).collect();
        prop_assert_eq!(custom_ids, def_ids);

        for column in &columns[..first_custom] {
            if let ColumnKey::Status(status) = column.key {
                prop_assert!(status == LeadStatus::New || !hidden.contains(&status));
                prop_assert!(!column.leads.is_empty() || column.fallback);
            }
        }
    }

    #[test]
    fn test_status_drop_always_clears_custom(
        leads in leads_strategy(),
        defs in defs_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!leads.is_empty());
        let board = Board::new(build_columns(&leads, &defs, &BTreeSet::new()));
        let active = &leads[pick.index(leads.len())].id;

        for column in board.columns.iter().filter(|c| !c.key.is_custom()) {
            match resolve_move(active, Some(column.id()), &board).unwrap() {
                MoveResult::Reassign { patch, .. } => {
                    prop_assert_eq!(patch.custom_column_id, FieldUpdate::Clear);
                }
                MoveResult::NoOp => {}
                MoveResult::Reorder { .. } => {
                    prop_assert!(false, "column drop reordered");
                }
            }
        }
    }

    #[test]
    fn test_same_column_drops_never_reassign(
        leads in leads_strategy(),
        defs in defs_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!leads.is_empty());
        let board = Board::new(build_columns(&leads, &defs, &BTreeSet::new()));
        let active = &leads[pick.index(leads.len())].id;
        let home = &board.columns[board.locate(active).unwrap().column];

        for other in &home.leads {
            let result = resolve_move(active, Some(other.id.as_str()), &board).unwrap();
            if &other.id == active {
                prop_assert_eq!(result, MoveResult::NoOp);
            } else {
                let is_reorder = matches!(result, MoveResult::Reorder { .. });
                prop_assert!(is_reorder);
            }
        }
    }
}
