//! MoveLead command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::operation::{logged, unlogged, Execute, ExecutionResult};
use crate::reconcile::{resolve_move, MoveResult};
use crate::types::{ColumnKey, LeadId, LeadPatch};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

/// Drop a lead onto a column or onto another lead.
///
/// Cross-column drops are persisted and logged. Drops inside one column only
/// reorder the displayed board until the next refresh.
#[derive(Debug, Deserialize, Serialize)]
pub struct MoveLead {
    /// The dragged lead
    pub lead: LeadId,
    /// Column id or lead id under the pointer, if any
    pub target: Option<String>,
}

crate::operation!(
    MoveLead,
    verb = "move",
    noun = "lead",
    description = "Move a lead to another column or position"
);

impl MoveLead {
    pub fn new(lead: impl Into<LeadId>, target: impl Into<String>) -> Self {
        Self {
            lead: lead.into(),
            target: Some(target.into()),
        }
    }

    /// A drop that ended outside every lane
    pub fn nowhere(lead: impl Into<LeadId>) -> Self {
        Self {
            lead: lead.into(),
            target: None,
        }
    }

    async fn persist(
        &self,
        ctx: &BoardContext,
        to: &ColumnKey,
        patch: &LeadPatch,
        resolved: &MoveResult,
    ) -> Result<Value> {
        let updated = match ctx.update_lead(&self.lead, patch).await {
            Ok(lead) => lead,
            Err(error) => {
                ctx.resync().await;
                return Err(error.into());
            }
        };
        info!(lead = %self.lead, to = %to, "lead reassigned");
        ctx.refresh().await?;

        let mut result = serde_json::to_value(resolved)?;
        result["lead"] = serde_json::to_value(&updated)?;
        Ok(result)
    }
}

#[async_trait]
impl Execute<BoardContext, KanbanError> for MoveLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let resolved = match ctx.board().await.and_then(|board| {
            resolve_move(&self.lead, self.target.as_deref(), &board).map_err(KanbanError::from)
        }) {
            Ok(resolved) => resolved,
            Err(error) => return unlogged(Err(error)),
        };

        match &resolved {
            MoveResult::NoOp => {
                debug!(lead = %self.lead, "drop changes nothing");
                unlogged(serde_json::to_value(&resolved).map_err(KanbanError::from))
            }
            MoveResult::Reorder { column, from, to } => {
                ctx.reorder(column.id(), *from, *to).await;
                unlogged(serde_json::to_value(&resolved).map_err(KanbanError::from))
            }
            MoveResult::Reassign { to, patch, .. } => logged(
                self,
                input,
                start,
                self.persist(ctx, to, patch, &resolved).await,
            ),
        }
    }
}
