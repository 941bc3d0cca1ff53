//! Per-lead sequencing of store updates
//!
//! Updates to the same lead run one at a time in the order they were issued,
//! so a slow early request can never land after a later one. Updates to
//! different leads run independently.

use crate::store::{LeadStore, StoreResult};
use crate::types::{Lead, LeadId, LeadPatch};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::trace;

/// FIFO queue per lead id. `tokio::sync::Mutex` grants the lock in request order.
#[derive(Debug, Default)]
pub struct LeadUpdateSequencer {
    queues: DashMap<LeadId, Arc<Mutex<()>>>,
}

impl LeadUpdateSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue `patch` for `id` once every earlier update for that lead has completed
    pub async fn update(
        &self,
        store: &dyn LeadStore,
        id: &LeadId,
        patch: &LeadPatch,
    ) -> StoreResult<Lead> {
        let queue = Arc::clone(&*self.queues.entry(id.clone()).or_default());

        let result = {
            let _turn = queue.lock().await;
            trace!(lead = %id, "issuing sequenced update");
            store.update(id, patch).await
        };

        drop(queue);
        self.queues
            .remove_if(id, |_, queue| Arc::strong_count(queue) == 1);
        result
    }

    /// Number of leads with an update queued or in flight
    pub fn pending_leads(&self) -> usize {
        self.queues.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StoreError};
    use crate::types::LeadStatus;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Delays the first update so a later one would overtake it if unsequenced
    struct SlowFirstUpdate {
        inner: MemoryStore,
        calls: std::sync::atomic::AtomicUsize,
    }

    #[async_trait]
    impl LeadStore for SlowFirstUpdate {
        async fn fetch_all(&self) -> StoreResult<Vec<Lead>> {
            self.inner.fetch_all().await
        }

        async fn update(&self, id: &LeadId, patch: &LeadPatch) -> StoreResult<Lead> {
            let call = self
                .calls
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if call == 0 {
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: &LeadId) -> StoreResult<()> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_updates_to_one_lead_apply_in_issue_order() {
        let store = Arc::new(SlowFirstUpdate {
            inner: MemoryStore::new(vec![Lead::new("1")], vec![]),
            calls: Default::default(),
        });
        let sequencer = Arc::new(LeadUpdateSequencer::new());

        let first = {
            let (store, sequencer) = (store.clone(), sequencer.clone());
            tokio::spawn(async move {
                sequencer
                    .update(&*store, &"1".into(), &LeadPatch::to_status(LeadStatus::Contacted))
                    .await
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = {
            let (store, sequencer) = (store.clone(), sequencer.clone());
            tokio::spawn(async move {
                sequencer
                    .update(&*store, &"1".into(), &LeadPatch::to_status(LeadStatus::Lost))
                    .await
            })
        };

        first.await.unwrap().unwrap();
        second.await.unwrap().unwrap();

        let leads = store.fetch_all().await.unwrap();
        assert_eq!(leads[0].status, Some(LeadStatus::Lost));
        assert_eq!(sequencer.pending_leads(), 0);
    }

    #[tokio::test]
    async fn test_failed_update_releases_queue() {
        let store = MemoryStore::new(vec![], vec![]);
        let sequencer = LeadUpdateSequencer::new();

        let result = sequencer
            .update(&store, &"ghost".into(), &LeadPatch::to_status(LeadStatus::New))
            .await;

        assert_eq!(result, Err(StoreError::not_found("ghost")));
        assert_eq!(sequencer.pending_leads(), 0);
    }
}
