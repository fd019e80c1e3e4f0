//! One CLI session: config, storage backend, the ERP aggregate and its writer

use anyhow::{Context, Result, bail};
use sqlx::SqlitePool;
use std::sync::Arc;

use super::ui;
use crate::auth::{AuthClient, AuthSession, build_http_client};
use crate::config::repository::sessions;
use crate::config::{Config, db};
use crate::domain::Severity;
use crate::state::AppState;
use crate::storage::retry::{RetryConfig, RetryPolicy};
use crate::storage::{BackendMode, LocalStore, PersistScheduler, RemoteStore, StateStore};
use crate::workflow::{Actor, Erp};

pub struct Session {
    pub config: Config,
    pub pool: SqlitePool,
    pub erp: Erp,
    scheduler: PersistScheduler,
}

impl Session {
    /// Picks the backend, loads or seeds the aggregate and starts the writer
    pub async fn open(config: Config, actor_override: Option<String>) -> Result<Self> {
        let pool = db::open(&config.db_path()?).await?;

        let remote = remote_session(&config, &pool).await?;
        let (store, actor): (Arc<dyn StateStore>, Actor) = match remote {
            Some(session) => {
                if let Some(other) = actor_override.as_deref() {
                    ui::warning(&format!(
                        "Ignoring --as {}; signed in as {}",
                        other, session.email
                    ));
                }
                let actor = Actor::new(session.email.clone());
                let http = build_http_client(&config.remote)?;
                let retry = RetryPolicy::new(RetryConfig::from_persistence(&config.persistence));
                let store = RemoteStore::new(http, &config.remote, session, retry)?
                    .with_session_cache(pool.clone());
                (Arc::new(store), actor)
            }
            None => {
                let email = actor_override.unwrap_or_else(|| config.session.local_actor.clone());
                let actor = Actor::new(email);
                (Arc::new(LocalStore::new(pool.clone())), actor)
            }
        };
        log::info!("Opening session for {} on {}", actor.name(), store.mode());

        let loaded = match store.mode() {
            BackendMode::Remote => ui::with_spinner("Loading remote state...", store.load()).await?,
            BackendMode::Local => store.load().await?,
        };

        let mut erp = Erp::new(AppState::default(), actor, config.policy.clone());
        match loaded {
            Some(state) => erp.replace_state(state),
            None => erp.seed(),
        }
        erp.ensure_current_user_profile();
        erp.fix_cursor();

        let scheduler = PersistScheduler::spawn(store, config.persistence.debounce());
        let mut session = Self {
            config,
            pool,
            erp,
            scheduler,
        };
        session.commit();
        Ok(session)
    }

    pub fn backend(&self) -> BackendMode {
        self.scheduler.mode()
    }

    /// Surfaces sync failures and queues the aggregate for saving
    pub fn commit(&mut self) {
        for message in self.scheduler.take_failures() {
            self.erp.notify("Sync Failed", &message, Severity::Danger);
        }
        self.scheduler.schedule(self.erp.state());
    }

    /// Writes anything pending and stops the writer
    pub async fn close(mut self) -> Result<()> {
        let backend = self.backend();
        let result = match backend {
            BackendMode::Remote => {
                let _spinner = ui::Spinner::start("Saving to remote backend...");
                self.scheduler.flush().await
            }
            BackendMode::Local => self.scheduler.flush().await,
        };
        for message in self.scheduler.take_failures() {
            ui::failure(&format!("Sync failed: {}", message));
        }
        self.scheduler.close().await?;
        self.pool.close().await;
        result
    }
}

/// Cached session for the configured backend, refreshed when expired
///
/// `None` means local mode. A configured backend without a session is an
/// error: the user has to sign in first.
async fn remote_session(config: &Config, pool: &SqlitePool) -> Result<Option<AuthSession>> {
    let Some((url, _)) = config.remote.credentials() else {
        return Ok(None);
    };

    let Some(session) = sessions::get(pool, url).await? else {
        bail!(
            "Remote backend {} is configured but nobody is signed in. Run `agri-erp auth sign-in` first.",
            url
        );
    };
    if !session.is_expired() {
        return Ok(Some(session));
    }

    log::info!("Session for {} expired, refreshing", session.email);
    let client = AuthClient::new(build_http_client(&config.remote)?, &config.remote)?;
    match ui::with_spinner("Refreshing session...", client.refresh(&session)).await {
        Ok(fresh) => {
            sessions::save(pool, url, &fresh).await?;
            Ok(Some(fresh))
        }
        Err(e) => {
            sessions::delete(pool, url).await?;
            Err(e).context("Session expired. Run `agri-erp auth sign-in` again")
        }
    }
}
