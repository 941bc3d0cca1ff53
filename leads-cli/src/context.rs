//! Shared state for one CLI invocation

use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, CliResult};
use leads_config::LeadsConfig;
use leads_kanban::{
    BoardContext, BoardOperationProcessor, HttpStore, HttpStoreOptions, MemoryStore,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A seed file backing the board in `--memory` mode
#[derive(Debug)]
struct SeedFile {
    path: PathBuf,
    store: Arc<MemoryStore>,
}

/// Board context, processor and output settings for the running command
pub struct CliContext {
    pub board: BoardContext,
    pub processor: BoardOperationProcessor,
    pub format: OutputFormat,
    seed: Option<SeedFile>,
}

impl CliContext {
    /// Load configuration from the standard locations and connect the stores
    pub async fn new(cli: &Cli) -> CliResult<Self> {
        let config = leads_config::load_configuration(cli.config.as_deref())?;
        Self::with_config(cli, config).await
    }

    /// Connect the stores described by `config` and the command line
    pub async fn with_config(cli: &Cli, config: LeadsConfig) -> CliResult<Self> {
        let (board, seed) = match &cli.memory {
            Some(path) => {
                let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                    CliError::with_context(format!("Could not read {}", path.display()), e)
                })?;
                let store = Arc::new(MemoryStore::from_json(&json).map_err(|e| {
                    CliError::with_context(format!("Invalid seed file {}", path.display()), e)
                })?);
                debug!(path = %path.display(), "using seed file as store");
                (
                    BoardContext::from_store(store.clone()),
                    Some(SeedFile {
                        path: path.clone(),
                        store,
                    }),
                )
            }
            None => {
                let mut options = HttpStoreOptions::new(config.store.require_base_url()?)
                    .with_timeout(config.store.timeout());
                if let Some(token) = &config.store.token {
                    options = options.with_token(token.clone());
                }
                debug!(base_url = %options.base_url, "using HTTP store");
                (BoardContext::from_store(Arc::new(HttpStore::new(options)?)), None)
            }
        };

        // A seed file outlives the process, so hidden lanes are kept in it
        let board = board
            .with_reassign_concurrency(config.board.reassign_concurrency)
            .with_persisted_hidden(config.board.persist_hidden_statuses || seed.is_some());

        let processor = match cli.actor.clone().or(config.actor) {
            Some(actor) => BoardOperationProcessor::with_actor(actor),
            None => BoardOperationProcessor::new(),
        };

        Ok(Self {
            board,
            processor,
            format: cli.format,
            seed,
        })
    }

    /// Write the memory store back to its seed file. Does nothing for the HTTP store.
    pub async fn save(&self) -> CliResult<()> {
        let Some(seed) = &self.seed else {
            return Ok(());
        };
        let snapshot = seed.store.snapshot().await;
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CliError::with_context("Could not serialize the board", e))?;
        tokio::fs::write(&seed.path, json).await.map_err(|e| {
            CliError::with_context(format!("Could not write {}", seed.path.display()), e)
        })?;
        debug!(path = %seed.path.display(), "seed file saved");
        Ok(())
    }
}
