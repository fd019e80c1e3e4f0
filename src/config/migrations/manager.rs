use anyhow::{Context, Result};
use log::{debug, info};
use sqlx::SqlitePool;

use super::{
    Migration, calculate_checksum, get_pending_migrations, init_migration_table,
    validate_migrations,
};

pub struct MigrationManager<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MigrationManager<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate_up(&self) -> Result<()> {
        init_migration_table(self.pool).await?;
        validate_migrations(self.pool).await?;

        let pending = get_pending_migrations(self.pool).await?;
        if pending.is_empty() {
            debug!("No pending migrations");
            return Ok(());
        }

        info!("Running {} pending migrations", pending.len());
        for migration in pending {
            self.apply(&migration).await?;
        }
        Ok(())
    }

    async fn apply(&self, migration: &Migration) -> Result<()> {
        info!("Migration {} '{}'", migration.version, migration.name);

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to start migration transaction")?;

        sqlx::query(&migration.up_sql)
            .execute(&mut *tx)
            .await
            .with_context(|| format!("Failed to execute migration {}", migration.version))?;

        sqlx::query("INSERT INTO schema_migrations (version, name, checksum) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(&migration.name)
            .bind(calculate_checksum(&migration.up_sql))
            .execute(&mut *tx)
            .await
            .context("Failed to record migration")?;

        tx.commit()
            .await
            .context("Failed to commit migration transaction")?;
        Ok(())
    }
}
