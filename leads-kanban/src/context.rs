//! BoardContext - store handles and transient board state
//!
//! The context provides access to the stores and the last reconciled board.
//! No business logic methods: the operations decide what to call and when.

use crate::error::Result;
use crate::reconcile::{build_board, Reassignment};
use crate::sequencer::LeadUpdateSequencer;
use crate::store::{ColumnStore, LeadStore, StoreResult};
use crate::types::{
    BatchReport, Board, FailedReassignment, Lead, LeadId, LeadPatch, LeadStatus, LogEntry,
};
use futures::stream::{self, StreamExt};
use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

/// Default number of lead updates in flight while evacuating a column
pub const DEFAULT_REASSIGN_CONCURRENCY: usize = 4;

/// What the board was last built from, plus local-only state
#[derive(Debug, Default)]
struct BoardState {
    board: Board,
    hidden: BTreeSet<LeadStatus>,
    loaded: bool,
}

/// Context passed to every operation
pub struct BoardContext {
    leads: Arc<dyn LeadStore>,
    columns: Arc<dyn ColumnStore>,
    state: RwLock<BoardState>,
    activity: Mutex<VecDeque<LogEntry>>,
    sequencer: LeadUpdateSequencer,
    reassign_concurrency: usize,
    persist_hidden: bool,
}

impl BoardContext {
    pub fn new(leads: Arc<dyn LeadStore>, columns: Arc<dyn ColumnStore>) -> Self {
        Self {
            leads,
            columns,
            state: RwLock::new(BoardState::default()),
            activity: Mutex::new(VecDeque::new()),
            sequencer: LeadUpdateSequencer::new(),
            reassign_concurrency: DEFAULT_REASSIGN_CONCURRENCY,
            persist_hidden: false,
        }
    }

    /// Context over a single store that serves both contracts
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: LeadStore + ColumnStore + 'static,
    {
        Self::new(store.clone(), store)
    }

    /// Limit concurrent lead updates during a column deletion (minimum 1)
    pub fn with_reassign_concurrency(mut self, limit: usize) -> Self {
        self.reassign_concurrency = limit.max(1);
        self
    }

    /// Keep the hidden status set in the Column Store instead of in memory
    pub fn with_persisted_hidden(mut self, persist: bool) -> Self {
        self.persist_hidden = persist;
        self
    }

    pub fn lead_store(&self) -> &dyn LeadStore {
        self.leads.as_ref()
    }

    pub fn column_store(&self) -> &dyn ColumnStore {
        self.columns.as_ref()
    }

    pub fn reassign_concurrency(&self) -> usize {
        self.reassign_concurrency
    }

    // =========================================================================
    // Board state
    // =========================================================================

    /// Rebuild the board from the stores.
    ///
    /// Local reorders are discarded. When hidden statuses are persisted the
    /// stored set replaces the in-memory one.
    pub async fn refresh(&self) -> Result<Board> {
        let (leads, defs) =
            futures::try_join!(self.leads.fetch_all(), self.columns.fetch_custom_columns())?;
        let stored_hidden = if self.persist_hidden {
            Some(self.columns.fetch_hidden_statuses().await?)
        } else {
            None
        };

        let mut state = self.state.write().await;
        if let Some(hidden) = stored_hidden {
            state.hidden = hidden.into_iter().collect();
        }
        state.board = build_board(&leads, &defs, &state.hidden);
        state.loaded = true;

        debug!(
            columns = state.board.columns.len(),
            leads = state.board.lead_count(),
            "board rebuilt"
        );
        Ok(state.board.clone())
    }

    /// Refresh and swallow the error; used to re-sync after a failed mutation
    pub(crate) async fn resync(&self) {
        if let Err(error) = self.refresh().await {
            warn!(%error, "re-sync after failed mutation did not complete");
        }
    }

    async fn ensure_loaded(&self) -> Result<()> {
        if !self.state.read().await.loaded {
            self.refresh().await?;
        }
        Ok(())
    }

    /// The board as currently displayed, including local reorders
    pub async fn board(&self) -> Result<Board> {
        self.ensure_loaded().await?;
        Ok(self.state.read().await.board.clone())
    }

    pub async fn hidden_statuses(&self) -> BTreeSet<LeadStatus> {
        self.state.read().await.hidden.clone()
    }

    /// Exclude a status lane from the board. Returns false if it was already hidden.
    pub async fn hide_status(&self, status: LeadStatus) -> Result<bool> {
        self.ensure_loaded().await?;
        let (inserted, hidden) = {
            let mut state = self.state.write().await;
            let inserted = state.hidden.insert(status);
            (inserted, state.hidden.iter().copied().collect::<Vec<_>>())
        };
        if inserted && self.persist_hidden {
            self.columns.replace_hidden_statuses(&hidden).await?;
        }
        Ok(inserted)
    }

    /// Show a hidden status lane again. Returns false if it was not hidden.
    pub async fn restore_status(&self, status: LeadStatus) -> Result<bool> {
        self.ensure_loaded().await?;
        let (removed, hidden) = {
            let mut state = self.state.write().await;
            let removed = state.hidden.remove(&status);
            (removed, state.hidden.iter().copied().collect::<Vec<_>>())
        };
        if removed && self.persist_hidden {
            self.columns.replace_hidden_statuses(&hidden).await?;
        }
        Ok(removed)
    }

    /// Apply a local reorder to the displayed board
    pub async fn reorder(&self, column_id: &str, from: usize, to: usize) -> bool {
        self.state.write().await.board.reorder(column_id, from, to)
    }

    // =========================================================================
    // Lead updates
    // =========================================================================

    /// Update a lead, queued behind earlier updates to the same lead
    pub async fn update_lead(&self, id: &LeadId, patch: &LeadPatch) -> StoreResult<Lead> {
        self.sequencer.update(self.leads.as_ref(), id, patch).await
    }

    /// Issue every reassignment, continuing past failures.
    ///
    /// At most `reassign_concurrency` updates are in flight. Failures are
    /// reported in input order.
    pub async fn reassign_all(&self, reassignments: &[Reassignment]) -> BatchReport {
        let outcomes: Vec<(Reassignment, StoreResult<Lead>)> =
            stream::iter(reassignments.iter().cloned())
                .map(|r| async move {
                    let outcome = self.update_lead(&r.lead, &r.patch).await;
                    (r, outcome)
                })
                .buffered(self.reassign_concurrency)
                .collect()
                .await;

        let mut report = BatchReport::default();
        for (reassignment, outcome) in outcomes {
            match outcome {
                Ok(_) => report.succeeded += 1,
                Err(error) => {
                    warn!(lead = %reassignment.lead, %error, "reassignment failed");
                    report.failed.push(FailedReassignment {
                        lead: reassignment.lead,
                        error: error.to_string(),
                    });
                }
            }
        }
        report
    }

    // =========================================================================
    // Activity log
    // =========================================================================

    /// Record an entry at the head of the activity log
    pub async fn append_activity(&self, entry: LogEntry) {
        self.activity.lock().await.push_front(entry);
    }

    /// Activity entries, newest first
    pub async fn read_activity(&self, limit: Option<usize>) -> Vec<LogEntry> {
        let activity = self.activity.lock().await;
        activity
            .iter()
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}
