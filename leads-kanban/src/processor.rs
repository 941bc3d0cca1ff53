//! Board operation processor
//!
//! Runs operations against a [`BoardContext`], attributes logged entries to
//! the acting user and appends them to the context's activity log.

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::operation::{Execute, OperationProcessor};
use crate::types::LogEntry;
use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, warn};

/// Processor for board operations
#[derive(Debug, Default, Clone)]
pub struct BoardOperationProcessor {
    actor: Option<String>,
}

impl BoardOperationProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attribute every logged entry to `actor`
    pub fn with_actor(actor: impl Into<String>) -> Self {
        Self {
            actor: Some(actor.into()),
        }
    }

    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }
}

#[async_trait]
impl OperationProcessor<BoardContext, KanbanError> for BoardOperationProcessor {
    async fn process<T>(&self, operation: &T, ctx: &BoardContext) -> Result<Value>
    where
        T: Execute<BoardContext, KanbanError> + Send + Sync,
    {
        let (result, log_entry) = operation.execute(ctx).await.split();

        if let Some(mut entry) = log_entry {
            if let Some(actor) = &self.actor {
                entry = entry.with_actor(actor.clone());
            }
            self.write_log(ctx, &entry).await?;
        }

        if let Err(error) = &result {
            warn!(op = %operation.op_string(), %error, "operation failed");
        }
        result
    }

    async fn write_log(&self, ctx: &BoardContext, log_entry: &LogEntry) -> Result<()> {
        info!(
            op = %log_entry.op,
            id = %log_entry.id,
            actor = log_entry.actor.as_deref().unwrap_or("-"),
            duration_ms = log_entry.duration_ms,
            "activity"
        );
        ctx.append_activity(log_entry.clone()).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GetBoard;
    use crate::column::AddColumn;
    use crate::lead::MoveLead;
    use crate::store::MemoryStore;
    use crate::types::Lead;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_logged_operations_reach_activity() {
        let ctx = BoardContext::from_store(Arc::new(MemoryStore::new(
            vec![Lead::new("1"), Lead::new("2")],
            vec![],
        )));
        let processor = BoardOperationProcessor::with_actor("sales@acme[web]");

        processor.process(&GetBoard, &ctx).await.unwrap();
        let column = processor
            .process(&AddColumn::new("Hot Leads"), &ctx)
            .await
            .unwrap();
        processor
            .process(&MoveLead::new("1", column["id"].as_str().unwrap()), &ctx)
            .await
            .unwrap();
        // Dropping a lead on itself is not logged
        processor.process(&MoveLead::new("2", "2"), &ctx).await.unwrap();

        let entries = ctx.read_activity(None).await;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].op, "move lead");
        assert_eq!(entries[1].op, "add column");
        assert!(entries
            .iter()
            .all(|e| e.actor.as_deref() == Some("sales@acme[web]")));
    }

    #[tokio::test]
    async fn test_failed_operation_is_logged() {
        let ctx = BoardContext::from_store(Arc::new(MemoryStore::default()));
        let processor = BoardOperationProcessor::new();

        assert!(processor.process(&AddColumn::new(""), &ctx).await.is_err());

        let entries = ctx.read_activity(None).await;
        assert_eq!(entries.len(), 1);
        assert!(entries[0].output["error"].is_string());
        assert_eq!(entries[0].actor, None);
    }
}
