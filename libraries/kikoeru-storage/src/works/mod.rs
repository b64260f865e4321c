//! Work rows (`t_work`)

use crate::error::Result;
use kikoeru_core::types::{Work, WorkId};
use sqlx::{Row, SqlitePool};

/// Get a work by id
pub async fn get_by_id(pool: &SqlitePool, id: WorkId) -> Result<Option<Work>> {
    let row = sqlx::query("SELECT id, root_folder, dir FROM t_work WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| Work {
        id: r.get("id"),
        root_folder: r.get("root_folder"),
        dir: r.get("dir"),
    }))
}

/// Create or replace a work row
pub async fn upsert(pool: &SqlitePool, work: &Work) -> Result<()> {
    sqlx::query(
        "INSERT INTO t_work (id, root_folder, dir)
         VALUES (?, ?, ?)
         ON CONFLICT(id)
         DO UPDATE SET
            root_folder = excluded.root_folder,
            dir = excluded.dir",
    )
    .bind(work.id)
    .bind(&work.root_folder)
    .bind(&work.dir)
    .execute(pool)
    .await?;

    Ok(())
}
