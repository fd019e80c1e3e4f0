//! Versioned schema migrations for the local database

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::collections::{BTreeMap, HashSet};

pub mod manager;

pub use manager::MigrationManager;

#[derive(Debug, Clone)]
pub struct Migration {
    pub version: i64,
    pub name: String,
    pub up_sql: String,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AppliedMigration {
    pub version: i64,
    pub name: String,
    pub checksum: String,
}

/// Migrations embedded in the binary, keyed by version
pub fn load_migrations() -> BTreeMap<i64, Migration> {
    let mut migrations = BTreeMap::new();

    migrations.insert(
        1,
        Migration {
            version: 1,
            name: "initial".to_string(),
            up_sql: include_str!("files/001_initial/up.sql").to_string(),
        },
    );

    migrations
}

pub async fn init_migration_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
            checksum TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    Ok(())
}

pub async fn get_applied_migrations(pool: &SqlitePool) -> Result<Vec<AppliedMigration>> {
    sqlx::query_as::<_, AppliedMigration>(
        "SELECT version, name, checksum FROM schema_migrations ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .context("Failed to get applied migrations")
}

/// Hex digest of the migration SQL
pub fn calculate_checksum(sql: &str) -> String {
    use sha2::{Digest, Sha256};

    Sha256::digest(sql.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Applied migrations must still exist and be unmodified
pub async fn validate_migrations(pool: &SqlitePool) -> Result<()> {
    let available = load_migrations();
    for applied in get_applied_migrations(pool).await? {
        let Some(migration) = available.get(&applied.version) else {
            anyhow::bail!(
                "Applied migration {} '{}' not found in available migrations",
                applied.version,
                applied.name
            );
        };
        let expected = calculate_checksum(&migration.up_sql);
        if applied.checksum != expected {
            anyhow::bail!(
                "Migration {} checksum mismatch! Applied: {}, Expected: {}",
                applied.version,
                applied.checksum,
                expected
            );
        }
    }
    Ok(())
}

pub async fn get_pending_migrations(pool: &SqlitePool) -> Result<Vec<Migration>> {
    let applied: HashSet<i64> = get_applied_migrations(pool)
        .await?
        .into_iter()
        .map(|m| m.version)
        .collect();

    Ok(load_migrations()
        .into_values()
        .filter(|m| !applied.contains(&m.version))
        .collect())
}

pub async fn get_current_version(pool: &SqlitePool) -> Result<Option<i64>> {
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await
        .context("Failed to get current schema version")?;
    Ok(version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_migrations() {
        let migrations = load_migrations();
        assert!(migrations.contains_key(&1));
        assert!(migrations[&1].up_sql.contains("local_state"));
    }

    #[test]
    fn test_calculate_checksum() {
        let a = calculate_checksum("CREATE TABLE t (id INTEGER);");
        assert_eq!(a, calculate_checksum("CREATE TABLE t (id INTEGER);"));
        assert_ne!(a, calculate_checksum("CREATE TABLE t2 (id INTEGER);"));
        assert_eq!(a.len(), 64);
    }
}
