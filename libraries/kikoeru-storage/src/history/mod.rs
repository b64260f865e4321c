//! Playback history (`t_history`)
//!
//! One row per `(user_name, work_id)`. Writes go through a single
//! `INSERT ... ON CONFLICT DO UPDATE` statement so concurrent saves for the
//! same key resolve inside `SQLite` (last writer wins).

use crate::error::Result;
use kikoeru_core::types::{HistoryEntry, HistoryRecord, UpsertHistory, WorkId};
use sqlx::{Row, SqlitePool};

/// Insert or replace the history record of a user for a work
pub async fn upsert(pool: &SqlitePool, history: &UpsertHistory) -> Result<()> {
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        "INSERT INTO t_history
         (user_name, work_id, hash, play_time, track_name, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(user_name, work_id)
         DO UPDATE SET
            hash = excluded.hash,
            play_time = excluded.play_time,
            track_name = excluded.track_name,
            updated_at = excluded.updated_at",
    )
    .bind(&history.user_name)
    .bind(history.work_id)
    .bind(&history.hash)
    .bind(history.play_time)
    .bind(&history.track_name)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get the `{hash, play_time}` entries of a user for a work
pub async fn get(pool: &SqlitePool, user_name: &str, work_id: WorkId) -> Result<Vec<HistoryEntry>> {
    let rows = sqlx::query(
        "SELECT hash, play_time FROM t_history
         WHERE user_name = ? AND work_id = ?",
    )
    .bind(user_name)
    .bind(work_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| HistoryEntry {
            hash: r.get("hash"),
            play_time: r.get("play_time"),
        })
        .collect())
}

/// Get the full history record of a user for a work
pub async fn get_record(
    pool: &SqlitePool,
    user_name: &str,
    work_id: WorkId,
) -> Result<Option<HistoryRecord>> {
    let row = sqlx::query(
        "SELECT user_name, work_id, hash, play_time, track_name, updated_at
         FROM t_history WHERE user_name = ? AND work_id = ?",
    )
    .bind(user_name)
    .bind(work_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| HistoryRecord {
        user_name: r.get("user_name"),
        work_id: r.get("work_id"),
        hash: r.get("hash"),
        play_time: r.get("play_time"),
        track_name: r.get("track_name"),
        updated_at: r.get("updated_at"),
    }))
}
