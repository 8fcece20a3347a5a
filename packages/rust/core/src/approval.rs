//! Approval: turn a draft into a published OKR in the injected store.

use chrono::{DateTime, Utc};
use okrcopilot_shared::{OkrContent, OkrDraft, OkrError, PublishedOkr, Result, require_text};
use okrcopilot_storage::PublishedStore;
use tracing::instrument;

/// Publish `draft` as of `now`. Pending baseline gaps are dropped, not checked.
#[instrument(skip_all, fields(theme = %draft.theme))]
pub async fn approve(
    draft: OkrDraft,
    store: &dyn PublishedStore,
    now: DateTime<Utc>,
) -> Result<PublishedOkr> {
    require_text(&draft.objective, "objective")?;
    if draft.key_results.is_empty() {
        return Err(OkrError::validation("at least one key result is required"));
    }

    store.publish(OkrContent::from(draft), now).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::OkrPipeline;
    use crate::key_results::FixedCount;
    use okrcopilot_storage::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn approving_twice_yields_two_entries() {
        let pipeline = OkrPipeline::new(Arc::new(FixedCount(3)));
        let store = MemoryStore::new(50).expect("store");
        let draft = pipeline.run("Grow revenue from 1M to 2M").expect("run");
        let now = Utc::now();

        let first = approve(draft.clone(), &store, now).await.expect("approve");
        let second = approve(draft, &store, now).await.expect("approve");
        assert_ne!(first.id, second.id);

        let list = store.list().await.expect("list");
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, first.id);
    }

    #[tokio::test]
    async fn copies_draft_fields() {
        let pipeline = OkrPipeline::new(Arc::new(FixedCount(4)));
        let store = MemoryStore::new(50).expect("store");
        let draft = pipeline.run("Boost team engagement").expect("run");

        let published = approve(draft.clone(), &store, Utc::now()).await.expect("approve");
        assert_eq!(published.theme, draft.theme);
        assert_eq!(published.objective, draft.objective);
        assert_eq!(published.key_results, draft.key_results);
        assert_eq!(published.confidence, draft.confidence);
    }

    #[tokio::test]
    async fn rejects_empty_draft() {
        let pipeline = OkrPipeline::new(Arc::new(FixedCount(3)));
        let store = MemoryStore::new(50).expect("store");
        let mut draft = pipeline.run("Boost team engagement").expect("run");
        draft.key_results.clear();

        let err = approve(draft, &store, Utc::now()).await.unwrap_err();
        assert!(matches!(err, OkrError::Validation { .. }));
        assert!(store.list().await.expect("list").is_empty());
    }
}
