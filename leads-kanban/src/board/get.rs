//! GetBoard command

use crate::context::BoardContext;
use crate::error::KanbanError;
use crate::operation::{unlogged, Execute, ExecutionResult};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Re-sync from the stores and return the reconciled board
#[derive(Debug, Default, Deserialize)]
pub struct GetBoard;

crate::operation!(
    GetBoard,
    verb = "get",
    noun = "board",
    description = "Fetch leads and columns and build the board"
);

#[async_trait]
impl Execute<BoardContext, KanbanError> for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(
            async {
                let board = ctx.refresh().await?;
                let hidden = ctx.hidden_statuses().await;

                let mut result = serde_json::to_value(&board)?;
                result["hidden"] = serde_json::to_value(&hidden)?;
                result["lead_count"] = serde_json::json!(board.lead_count());
                Ok(result)
            }
            .await,
        )
    }
}
