//! RestoreColumn command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::operation::{logged, Execute, ExecutionResult};
use crate::types::LeadStatus;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Bring back a deleted status lane.
///
/// The lane reappears once a lead holds its status again; leads moved to
/// `New` when it was deleted stay there.
#[derive(Debug, Deserialize, Serialize)]
pub struct RestoreColumn {
    pub status: LeadStatus,
}

crate::operation!(
    RestoreColumn,
    verb = "restore",
    noun = "column",
    description = "Show a deleted status column again"
);

impl RestoreColumn {
    pub fn new(status: LeadStatus) -> Self {
        Self { status }
    }
}

#[async_trait]
impl Execute<BoardContext, KanbanError> for RestoreColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let restored = ctx.restore_status(self.status).await?;
            if restored {
                info!(status = %self.status, "status column restored");
            }
            ctx.refresh().await?;
            Ok(serde_json::json!({ "status": self.status, "restored": restored }))
        }
        .await;

        logged(self, input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::DeleteColumn;
    use crate::store::{LeadStore, MemoryStore};
    use crate::types::{Lead, LeadPatch};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_restore_after_delete() {
        let store = Arc::new(MemoryStore::new(
            vec![Lead::new("1"), Lead::new("2").with_status(LeadStatus::Lost)],
            vec![],
        ));
        let ctx = BoardContext::from_store(store.clone());

        DeleteColumn::new("Lost")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        // A lead regains the hidden status: it still shows in New
        store
            .update(&"2".into(), &LeadPatch::to_status(LeadStatus::Lost))
            .await
            .unwrap();
        assert!(ctx.refresh().await.unwrap().column_by_id("Lost").is_none());

        let result = RestoreColumn::new(LeadStatus::Lost)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["restored"], true);

        let board = ctx.board().await.unwrap();
        assert_eq!(board.column_by_id("Lost").unwrap().lead_ids(), vec!["2"]);
    }

    #[tokio::test]
    async fn test_restore_visible_status() {
        let ctx = BoardContext::from_store(Arc::new(MemoryStore::default()));

        let result = RestoreColumn::new(LeadStatus::Converted)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["restored"], false);
        assert_eq!(result["status"], "Converted");
    }
}
