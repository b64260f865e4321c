use crate::{history, works};
use async_trait::async_trait;
use kikoeru_core::{
    error::Result,
    storage::{HistoryStore, WorkStore},
    types::{HistoryEntry, UpsertHistory, Work, WorkId},
};
use sqlx::SqlitePool;

/// Local storage context using `SQLite`
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl WorkStore for LocalStorageContext {
    async fn get_work(&self, id: WorkId) -> Result<Option<Work>> {
        works::get_by_id(&self.pool, id).await.map_err(|e| {
            tracing::error!("Failed to query work {}: {}", id, e);
            e.into()
        })
    }
}

#[async_trait]
impl HistoryStore for LocalStorageContext {
    async fn upsert_history(&self, history: UpsertHistory) -> Result<()> {
        history::upsert(&self.pool, &history).await.map_err(|e| {
            tracing::error!(
                "UPSERT failed for user {} work {}: {}",
                history.user_name,
                history.work_id,
                e
            );
            e.into()
        })
    }

    async fn get_history(&self, user_name: &str, work_id: WorkId) -> Result<Vec<HistoryEntry>> {
        history::get(&self.pool, user_name, work_id)
            .await
            .map_err(|e| {
                tracing::error!(
                    "Failed to query history for user {} work {}: {}",
                    user_name,
                    work_id,
                    e
                );
                e.into()
            })
    }
}
