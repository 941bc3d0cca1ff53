//! DeleteColumn command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::operation::{logged, unlogged, Execute, ExecutionResult};
use crate::reconcile::{plan_deletion, DeletionPlan};
use crate::store::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Delete a column, evacuating its leads.
///
/// Leads of a custom column lose their custom placement; leads of a status
/// column move to `New` and the status lane is hidden. Reassignment is best
/// effort: failures are reported, successes are kept.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteColumn {
    /// Status value or custom column id
    pub id: String,
}

crate::operation!(
    DeleteColumn,
    verb = "delete",
    noun = "column",
    description = "Delete a column and move its leads out"
);

impl DeleteColumn {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    async fn apply(&self, ctx: &BoardContext, plan: DeletionPlan) -> Result<Value> {
        let report = ctx.reassign_all(plan.reassignments()).await;
        if !report.is_complete() {
            warn!(
                column = %self.id,
                failed = report.failed.len(),
                succeeded = report.succeeded,
                "some leads could not be moved out of the column"
            );
        }

        let (kind, persisted) = match &plan {
            DeletionPlan::Custom { id, .. } => {
                let deleted = match ctx.column_store().delete_custom_column(id).await {
                    Err(StoreError::NotFound { .. }) => {
                        debug!(column = %id, "definition already gone from the store");
                        Ok(())
                    }
                    other => other.map_err(KanbanError::from),
                };
                ("custom", deleted)
            }
            DeletionPlan::Status { status, .. } => {
                ("status", ctx.hide_status(*status).await.map(|_| ()))
            }
            DeletionPlan::KeepFallback => ("status", Ok(())),
        };
        if let Err(error) = persisted {
            ctx.resync().await;
            return Err(error);
        }
        info!(column = %self.id, kind, moved = report.succeeded, "column deleted");

        ctx.refresh().await?;
        Ok(json!({
            "deleted": true,
            "id": self.id,
            "kind": kind,
            "report": report,
        }))
    }
}

#[async_trait]
impl Execute<BoardContext, KanbanError> for DeleteColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        let start = Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let planned: Result<DeletionPlan> = async {
            let board = ctx.board().await?;
            Ok(plan_deletion(&self.id, &board)?)
        }
        .await;

        match planned {
            Ok(DeletionPlan::KeepFallback) => {
                debug!(column = %self.id, "fallback lane is kept");
                unlogged(Ok(json!({
                    "deleted": false,
                    "id": self.id,
                    "reason": "the fallback New lane cannot be deleted",
                })))
            }
            Ok(plan) => logged(self, input, start, self.apply(ctx, plan).await),
            Err(error) => logged(self, input, start, Err(error)),
        }
    }
}
