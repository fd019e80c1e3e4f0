//! Key-value rows holding serialized snapshots

use anyhow::{Context, Result};
use sqlx::SqlitePool;

/// Insert or replace the value stored under `key`
pub async fn put(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO local_state (key, value, updated_at)
        VALUES (?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to store local state '{}'", key))?;

    log::debug!("Stored local state '{}' ({} bytes)", key, value.len());
    Ok(())
}

pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM local_state WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await
        .with_context(|| format!("Failed to read local state '{}'", key))?;

    Ok(row.map(|(value,)| value))
}

pub async fn delete(pool: &SqlitePool, key: &str) -> Result<bool> {
    let result = sqlx::query("DELETE FROM local_state WHERE key = ?")
        .bind(key)
        .execute(pool)
        .await
        .with_context(|| format!("Failed to delete local state '{}'", key))?;

    Ok(result.rows_affected() > 0)
}
