//! AddColumn command

use crate::context::BoardContext;
use crate::error::{KanbanError, Result};
use crate::operation::{logged, Execute, ExecutionResult};
use crate::reconcile::plan_new_column;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Add a custom column to the board
#[derive(Debug, Deserialize, Serialize)]
pub struct AddColumn {
    /// The column display title
    pub title: String,
}

crate::operation!(
    AddColumn,
    verb = "add",
    noun = "column",
    description = "Add a custom column to the board"
);

impl AddColumn {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

#[async_trait]
impl Execute<BoardContext, KanbanError> for AddColumn {
    async fn execute(&self, ctx: &BoardContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let input = serde_json::to_value(self).unwrap_or_default();

        let result: Result<Value> = async {
            let board = ctx.board().await?;
            let defs = ctx.column_store().fetch_custom_columns().await?;
            let plan = plan_new_column(&self.title, &board.columns, &defs)?;

            if let Err(error) = ctx
                .column_store()
                .replace_custom_columns(&plan.definitions)
                .await
            {
                ctx.resync().await;
                return Err(KanbanError::from(error));
            }
            info!(id = %plan.column.id, title = %plan.column.title, "custom column added");

            ctx.refresh().await?;
            Ok(serde_json::to_value(&plan.column)?)
        }
        .await;

        logged(self, input, start, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::LifecycleError;
    use crate::store::MemoryStore;
    use crate::types::{ColumnDef, Lead, LeadStatus};
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryStore>, BoardContext) {
        let store = Arc::new(MemoryStore::new(
            vec![Lead::new("1").with_status(LeadStatus::Contacted)],
            vec![ColumnDef::new("custom-a", "Hot Leads", 0)],
        ));
        let ctx = BoardContext::from_store(store.clone());
        (store, ctx)
    }

    #[tokio::test]
    async fn test_add_column() {
        let (store, ctx) = setup();

        let result = AddColumn::new("  Follow Up  ")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        assert_eq!(result["title"], "Follow Up");
        assert_eq!(result["order"], 1);
        assert!(result["id"].as_str().unwrap().starts_with("custom-"));

        let columns = store.snapshot().await.columns;
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].id.as_str(), "custom-a");
        assert_eq!(columns[1].title, "Follow Up");

        let board = ctx.board().await.unwrap();
        assert_eq!(board.columns.last().unwrap().title, "Follow Up");
    }

    #[tokio::test]
    async fn test_add_column_duplicate_title() {
        let (store, ctx) = setup();

        for title in ["hot leads", "CONTACTED"] {
            let result = AddColumn::new(title).execute(&ctx).await;
            assert!(matches!(
                result.into_result(),
                Err(KanbanError::Lifecycle(
                    LifecycleError::DuplicateColumnTitle { .. }
                ))
            ));
        }
        assert_eq!(store.snapshot().await.columns.len(), 1);
    }

    #[tokio::test]
    async fn test_add_column_empty_title() {
        let (store, ctx) = setup();

        let result = AddColumn::new("   ").execute(&ctx).await;
        assert!(result.should_log());
        assert!(matches!(
            result.into_result(),
            Err(KanbanError::Lifecycle(LifecycleError::EmptyColumnTitle))
        ));
        assert_eq!(store.snapshot().await.columns.len(), 1);
    }
}
