//! ListColumns command

use crate::context::BoardContext;
use crate::error::KanbanError;
use crate::operation::{unlogged, Execute, ExecutionResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

/// List the board's columns with their lead counts
#[derive(Debug, Default, Deserialize)]
pub struct ListColumns;

crate::operation!(
    ListColumns,
    verb = "list",
    noun = "columns",
    description = "List columns in board order"
);

#[async_trait]
impl Execute<BoardContext, KanbanError> for ListColumns {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(
            async {
                let board = ctx.board().await?;
                let columns: Vec<Value> = board
                    .columns
                    .iter()
                    .map(|column| {
                        let kind = if column.key.is_custom() { "custom" } else { "status" };
                        json!({
                            "id": column.id(),
                            "title": column.title,
                            "kind": kind,
                            "fallback": column.fallback,
                            "lead_count": column.leads.len(),
                        })
                    })
                    .collect();

                Ok(json!({
                    "count": columns.len(),
                    "columns": columns,
                }))
            }
            .await,
        )
    }
}
