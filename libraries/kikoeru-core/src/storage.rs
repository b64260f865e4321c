//! Storage traits consumed by the media core
//!
//! These abstract the relational store so the resolver and the history
//! endpoints can run against `SQLite` or an in-memory fake.

use crate::error::Result;
use crate::types::{HistoryEntry, UpsertHistory, Work, WorkId};
use async_trait::async_trait;

/// Read access to indexed works
#[async_trait]
pub trait WorkStore: Send + Sync {
    /// Get a work by id
    async fn get_work(&self, id: WorkId) -> Result<Option<Work>>;
}

/// Per-user, per-work playback positions
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Insert or replace the record keyed by `(user_name, work_id)`
    ///
    /// Overwrites hash, play time and track name and refreshes the update
    /// timestamp. Never creates a second row for the same key.
    async fn upsert_history(&self, history: UpsertHistory) -> Result<()>;

    /// Get the history entries of a user for a work
    async fn get_history(&self, user_name: &str, work_id: WorkId) -> Result<Vec<HistoryEntry>>;
}
