//! In-process published-OKR store.

use std::collections::VecDeque;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use okrcopilot_shared::{OkrContent, OkrError, PublishedOkr, Result};
use tokio::sync::Mutex;

use crate::{PublishedStore, next_id};

/// Bounded most-recent-first list held in memory.
#[derive(Debug)]
pub struct MemoryStore {
    entries: Mutex<VecDeque<PublishedOkr>>,
    capacity: usize,
}

impl MemoryStore {
    /// Create an empty store retaining at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(OkrError::config("store capacity must be at least 1"));
        }
        Ok(Self {
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        })
    }
}

#[async_trait]
impl PublishedStore for MemoryStore {
    async fn publish(&self, content: OkrContent, timestamp: DateTime<Utc>) -> Result<PublishedOkr> {
        let mut entries = self.entries.lock().await;

        let id = next_id(entries.front().map(|e| e.id), timestamp);
        let okr = PublishedOkr::new(id, content, timestamp);
        entries.push_front(okr.clone());
        entries.truncate(self.capacity);

        Ok(okr)
    }

    async fn list(&self) -> Result<Vec<PublishedOkr>> {
        Ok(self.entries.lock().await.iter().cloned().collect())
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
