//! DeleteLead command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::operation::{logged, Execute, ExecutionResult};
use crate::types::LeadId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Delete a lead from the Leads Store
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteLead {
    pub id: LeadId,
}

crate::operation!(
    DeleteLead,
    verb = "delete",
    noun = "lead",
    description = "Delete a lead"
);

impl DeleteLead {
    pub fn new(id: impl Into<LeadId>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl Execute<BoardContext, KanbanError> for DeleteLead {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            if let Err(error) = ctx.lead_store().delete(&self.id).await {
                ctx.resync().await;
                return Err(KanbanError::from(error));
            }
            info!(lead = %self.id, "lead deleted");
            ctx.refresh().await?;
            Ok(serde_json::json!({ "deleted": true, "id": self.id }))
        }
        .await;

        logged(self, input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use crate::types::Lead;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_delete_lead() {
        let store = Arc::new(MemoryStore::new(vec![Lead::new("1"), Lead::new("2")], vec![]));
        let ctx = BoardContext::from_store(store.clone());

        let result = DeleteLead::new("1").execute(&ctx).await.into_result().unwrap();

        assert_eq!(result["id"], "1");
        assert_eq!(store.snapshot().await.leads.len(), 1);
        assert_eq!(ctx.board().await.unwrap().lead_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_missing_lead() {
        let ctx = BoardContext::from_store(Arc::new(MemoryStore::default()));

        let result = DeleteLead::new("nope").execute(&ctx).await;
        assert!(result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::Persistence(StoreError::NotFound { .. }))
        ));
    }
}
