//! Published-OKR storage.
//!
//! [`PublishedStore`] is the seam the approval step and the delivery surfaces
//! depend on. Two implementations:
//! - [`MemoryStore`]: process-local, for tests and throwaway servers
//! - [`Storage`]: Turso Embedded / libSQL file, survives restarts
//!
//! Both keep at most `capacity` entries, newest first, and evict the oldest
//! silently. Ids are creation-time milliseconds, bumped so they never repeat.

mod memory;
mod migrations;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database, TransactionBehavior, params};
use okrcopilot_shared::{OkrContent, OkrError, OkrId, PublishedOkr, Result};
use tokio::sync::Mutex;

pub use memory::MemoryStore;

/// Bounded, append-only list of approved OKRs.
#[async_trait]
pub trait PublishedStore: Send + Sync {
    /// Append `content` as the newest entry and return it with its id.
    async fn publish(&self, content: OkrContent, timestamp: DateTime<Utc>) -> Result<PublishedOkr>;

    /// All retained entries, most recent first.
    async fn list(&self) -> Result<Vec<PublishedOkr>>;

    /// Maximum number of retained entries.
    fn capacity(&self) -> usize;
}

/// Next id: the timestamp in ms, or one past the newest id if that is not larger.
pub(crate) fn next_id(newest: Option<OkrId>, timestamp: DateTime<Utc>) -> OkrId {
    let millis = timestamp.timestamp_millis();
    match newest {
        Some(OkrId(last)) if last >= millis => OkrId(last + 1),
        _ => OkrId(millis),
    }
}

/// How long a writer waits for another process holding the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

fn storage_err(e: impl std::fmt::Display) -> OkrError {
    OkrError::Storage(e.to_string())
}

/// libSQL-backed published-OKR store.
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
    capacity: usize,
    /// Serialises id assignment, insert and eviction within this process.
    /// Other processes are kept out by the immediate transaction.
    write_lock: Mutex<()>,
}

impl Storage {
    /// Open or create a database at `path`.
    pub async fn open(path: &Path, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(OkrError::config("store capacity must be at least 1"));
        }

        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| OkrError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(storage_err)?;

        let conn = db.connect().map_err(storage_err)?;
        conn.busy_timeout(BUSY_TIMEOUT).map_err(storage_err)?;

        let storage = Self {
            db,
            conn,
            capacity,
            write_lock: Mutex::new(()),
        };
        storage.run_migrations().await?;
        Ok(storage)
    }

    /// Run pending schema migrations.
    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                tracing::info!(
                    version = migration.version,
                    description = migration.description,
                    "applying migration"
                );
                self.conn
                    .execute_batch(migration.sql)
                    .await
                    .map_err(|e| {
                        OkrError::Storage(format!("migration v{} failed: {e}", migration.version))
                    })?;
            }
        }
        Ok(())
    }

    /// Get the current schema version, or 0 if no migrations have been applied.
    async fn get_schema_version(&self) -> u32 {
        let result = self
            .conn
            .query("SELECT MAX(version) FROM schema_migrations", params![])
            .await;

        match result {
            Ok(mut rows) => {
                if let Ok(Some(row)) = rows.next().await {
                    row.get::<u32>(0).unwrap_or(0)
                } else {
                    0
                }
            }
            Err(_) => 0, // Table doesn't exist yet
        }
    }
}

async fn newest_id(conn: &Connection) -> Result<Option<OkrId>> {
    let mut rows = conn
        .query("SELECT MAX(id) FROM published_okrs", params![])
        .await
        .map_err(storage_err)?;

    match rows.next().await.map_err(storage_err)? {
        // MAX over an empty table is NULL
        Some(row) => Ok(row.get::<i64>(0).ok().map(OkrId)),
        None => Ok(None),
    }
}

#[async_trait]
impl PublishedStore for Storage {
    async fn publish(&self, content: OkrContent, timestamp: DateTime<Utc>) -> Result<PublishedOkr> {
        let key_results_json = serde_json::to_string(&content.key_results).map_err(storage_err)?;

        let _guard = self.write_lock.lock().await;
        // Id, insert and eviction commit together or not at all.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await
            .map_err(storage_err)?;

        let id = next_id(newest_id(&tx).await?, timestamp);

        tx.execute(
            "INSERT INTO published_okrs (id, theme, objective, key_results_json, confidence, published_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                id.0,
                content.theme.as_str(),
                content.objective.as_str(),
                key_results_json.as_str(),
                content.confidence.as_str(),
                timestamp.to_rfc3339(),
            ],
        )
        .await
        .map_err(storage_err)?;

        let evicted = tx
            .execute(
                "DELETE FROM published_okrs WHERE id NOT IN
                   (SELECT id FROM published_okrs ORDER BY id DESC LIMIT ?1)",
                params![self.capacity as i64],
            )
            .await
            .map_err(storage_err)?;

        tx.commit().await.map_err(storage_err)?;

        if evicted > 0 {
            tracing::debug!(evicted, "evicted oldest published OKRs");
        }
        tracing::info!(%id, theme = %content.theme, "published OKR");

        Ok(PublishedOkr::new(id, content, timestamp))
    }

    async fn list(&self) -> Result<Vec<PublishedOkr>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, theme, objective, key_results_json, confidence, published_at
                 FROM published_okrs ORDER BY id DESC LIMIT ?1",
                params![self.capacity as i64],
            )
            .await
            .map_err(storage_err)?;

        let mut results = Vec::new();
        while let Some(row) = rows.next().await.map_err(storage_err)? {
            results.push(row_to_published(&row)?);
        }
        Ok(results)
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Convert a database row to a [`PublishedOkr`].
fn row_to_published(row: &libsql::Row) -> Result<PublishedOkr> {
    let id: i64 = row.get(0).map_err(storage_err)?;
    let theme: String = row.get(1).map_err(storage_err)?;
    let objective: String = row.get(2).map_err(storage_err)?;
    let key_results_json: String = row.get(3).map_err(storage_err)?;
    let confidence: String = row.get(4).map_err(storage_err)?;
    let published_at: String = row.get(5).map_err(storage_err)?;

    Ok(PublishedOkr {
        id: OkrId(id),
        theme: theme.parse().map_err(storage_err)?,
        objective,
        key_results: serde_json::from_str(&key_results_json).map_err(storage_err)?,
        confidence: confidence.parse().map_err(storage_err)?,
        timestamp: DateTime::parse_from_rfc3339(&published_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| OkrError::Storage(format!("invalid date: {e}")))?,
    })
}
