use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use super::{BackendMode, LOCAL_STATE_KEY, StateStore};
use crate::config::repository::local_state;
use crate::state::AppState;

/// Snapshot stored in the local SQLite `local_state` table
#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
    key: String,
}

impl LocalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_key(pool, LOCAL_STATE_KEY)
    }

    pub fn with_key(pool: SqlitePool, key: impl Into<String>) -> Self {
        Self {
            pool,
            key: key.into(),
        }
    }
}

#[async_trait]
impl StateStore for LocalStore {
    fn mode(&self) -> BackendMode {
        BackendMode::Local
    }

    async fn load(&self) -> Result<Option<AppState>> {
        let Some(raw) = local_state::get(&self.pool, &self.key).await? else {
            log::info!("No local snapshot under '{}'", self.key);
            return Ok(None);
        };

        match AppState::from_json(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                log::warn!("Ignoring unreadable local snapshot '{}': {:#}", self.key, e);
                Ok(None)
            }
        }
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        let raw = state.to_json()?;
        local_state::put(&self.pool, &self.key, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db;

    #[tokio::test]
    async fn test_corrupt_snapshot_loads_as_absent() {
        let pool = db::open_memory().await.unwrap();
        local_state::put(&pool, LOCAL_STATE_KEY, "{not json").await.unwrap();

        let store = LocalStore::new(pool);
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(store.mode(), BackendMode::Local);
    }
}
