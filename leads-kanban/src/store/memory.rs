//! In-process store implementing both store contracts

use super::{ColumnStore, LeadStore, StoreError, StoreResult};
use crate::types::{ColumnDef, CustomColumnId, FieldUpdate, Lead, LeadId, LeadPatch, LeadStatus};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Initial contents of a [`MemoryStore`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSeed {
    #[serde(default)]
    pub leads: Vec<Lead>,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub hidden: Vec<LeadStatus>,
}

/// Leads, custom columns and hidden statuses held in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    leads: RwLock<Vec<Lead>>,
    columns: RwLock<Vec<ColumnDef>>,
    hidden: RwLock<Vec<LeadStatus>>,
    updates: AtomicUsize,
}

impl MemoryStore {
    pub fn new(leads: Vec<Lead>, columns: Vec<ColumnDef>) -> Self {
        Self::from_seed(StoreSeed {
            leads,
            columns,
            hidden: Vec::new(),
        })
    }

    pub fn from_seed(seed: StoreSeed) -> Self {
        Self {
            leads: RwLock::new(seed.leads),
            columns: RwLock::new(seed.columns),
            hidden: RwLock::new(seed.hidden),
            updates: AtomicUsize::new(0),
        }
    }

    /// Parse a seed document (`{"leads": [...], "columns": [...], "hidden": [...]}`)
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        Ok(Self::from_seed(serde_json::from_str(json)?))
    }

    /// Snapshot of the current contents
    pub async fn snapshot(&self) -> StoreSeed {
        StoreSeed {
            leads: self.leads.read().await.clone(),
            columns: self.columns.read().await.clone(),
            hidden: self.hidden.read().await.clone(),
        }
    }

    /// Number of lead updates applied so far
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeadStore for MemoryStore {
    async fn fetch_all(&self) -> StoreResult<Vec<Lead>> {
        Ok(self.leads.read().await.clone())
    }

    async fn update(&self, id: &LeadId, patch: &LeadPatch) -> StoreResult<Lead> {
        if patch.is_empty() {
            return Err(StoreError::validation("update has no fields"));
        }
        if let FieldUpdate::Set(column) = &patch.custom_column_id {
            if !self.columns.read().await.iter().any(|c| &c.id == column) {
                return Err(StoreError::validation(format!(
                    "unknown custom column: {column}"
                )));
            }
        }

        let mut leads = self.leads.write().await;
        let lead = leads
            .iter_mut()
            .find(|l| &l.id == id)
            .ok_or_else(|| StoreError::not_found(id.as_str()))?;
        lead.apply(patch);
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(lead.clone())
    }

    async fn delete(&self, id: &LeadId) -> StoreResult<()> {
        let mut leads = self.leads.write().await;
        let before = leads.len();
        leads.retain(|l| &l.id != id);
        if leads.len() == before {
            return Err(StoreError::not_found(id.as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl ColumnStore for MemoryStore {
    async fn fetch_custom_columns(&self) -> StoreResult<Vec<ColumnDef>> {
        Ok(self.columns.read().await.clone())
    }

    async fn replace_custom_columns(&self, columns: &[ColumnDef]) -> StoreResult<()> {
        let mut ids = HashSet::new();
        for column in columns {
            if !ids.insert(&column.id) {
                return Err(StoreError::validation(format!(
                    "duplicate custom column id: {}",
                    column.id
                )));
            }
        }
        *self.columns.write().await = columns.to_vec();
        Ok(())
    }

    async fn delete_custom_column(&self, id: &CustomColumnId) -> StoreResult<()> {
        let mut columns = self.columns.write().await;
        let before = columns.len();
        columns.retain(|c| &c.id != id);
        if columns.len() == before {
            return Err(StoreError::not_found(id.as_str()));
        }
        Ok(())
    }

    async fn fetch_hidden_statuses(&self) -> StoreResult<Vec<LeadStatus>> {
        Ok(self.hidden.read().await.clone())
    }

    async fn replace_hidden_statuses(&self, hidden: &[LeadStatus]) -> StoreResult<()> {
        *self.hidden.write().await = hidden.to_vec();
        Ok(())
    }
}
