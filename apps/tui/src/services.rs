//! Pipeline and store handles shared by every screen.

use std::sync::Arc;

use chrono::Utc;
use color_eyre::eyre::Result;
use okrcopilot_core::{OkrPipeline, approve};
use okrcopilot_shared::{AppConfig, OkrDraft, PublishedOkr};
use okrcopilot_storage::{PublishedStore, Storage};
use tokio::runtime::Runtime;

/// The TUI event loop is synchronous, so store calls are driven on a
/// private current-thread runtime.
pub(crate) struct Services {
    pub pipeline: OkrPipeline,
    store: Arc<dyn PublishedStore>,
    runtime: Runtime,
}

impl Services {
    /// Open the on-disk store named by `config`.
    pub(crate) fn open(config: &AppConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let path = config.storage.resolved_path()?;
        let store = runtime.block_on(Storage::open(&path, config.storage.capacity))?;

        Ok(Self {
            pipeline: OkrPipeline::default(),
            store: Arc::new(store),
            runtime,
        })
    }

    #[cfg(test)]
    pub(crate) fn in_memory(pipeline: OkrPipeline, capacity: usize) -> Self {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        let store = okrcopilot_storage::MemoryStore::new(capacity).expect("store");
        Self {
            pipeline,
            store: Arc::new(store),
            runtime,
        }
    }

    pub(crate) fn approve(&self, draft: OkrDraft) -> okrcopilot_shared::Result<PublishedOkr> {
        self.runtime
            .block_on(approve(draft, self.store.as_ref(), Utc::now()))
    }

    pub(crate) fn published(&self) -> okrcopilot_shared::Result<Vec<PublishedOkr>> {
        self.runtime.block_on(self.store.list())
    }
}
