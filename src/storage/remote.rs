//! Snapshot row in the hosted backend's `erp_state` table
//!
//! One row per signed-in user, written as a PostgREST upsert keyed on
//! `user_id`. The access token is refreshed before it expires and once more
//! when the backend answers 401; a refreshed session is written back to the
//! session cache when one is attached.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tokio::sync::RwLock;

use super::retry::RetryPolicy;
use super::{BackendMode, StateStore};
use crate::auth::{AuthClient, AuthSession};
use crate::config::RemoteConfig;
use crate::config::repository::sessions;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct StateRow {
    state_json: Option<Value>,
}

pub struct RemoteStore {
    http: reqwest::Client,
    auth: AuthClient,
    base_url: String,
    anon_key: String,
    table: String,
    user_id: String,
    email: String,
    session: RwLock<AuthSession>,
    session_cache: Option<SqlitePool>,
    retry: RetryPolicy,
}

impl RemoteStore {
    pub fn new(
        http: reqwest::Client,
        remote: &RemoteConfig,
        session: AuthSession,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let (url, key) = remote
            .credentials()
            .context("Remote backend url and anon key are not configured")?;
        Ok(Self {
            auth: AuthClient::new(http.clone(), remote)?,
            http,
            base_url: url.to_string(),
            anon_key: key.to_string(),
            table: remote.table.clone(),
            user_id: session.user_id.clone(),
            email: session.email.clone(),
            session: RwLock::new(session),
            session_cache: None,
            retry,
        })
    }

    /// Keeps refreshed sessions in the local `sessions` table
    pub fn with_session_cache(mut self, pool: SqlitePool) -> Self {
        self.session_cache = Some(pool);
        self
    }

    /// Session currently used for requests
    pub async fn current_session(&self) -> AuthSession {
        self.session.read().await.clone()
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, request: RequestBuilder, token: &str) -> RequestBuilder {
        request.header("apikey", &self.anon_key).bearer_auth(token)
    }

    /// Access token, refreshed first when it is about to expire
    async fn access_token(&self) -> Result<String> {
        let stale = {
            let session = self.session.read().await;
            if !session.is_expired() {
                return Ok(session.access_token.clone());
            }
            session.access_token.clone()
        };
        self.refresh(&stale).await
    }

    /// Replaces `stale` with a fresh token unless another call already did
    async fn refresh(&self, stale: &str) -> Result<String> {
        let mut session = self.session.write().await;
        if session.access_token != stale && !session.is_expired() {
            return Ok(session.access_token.clone());
        }

        log::info!("Refreshing remote session for {}", self.email);
        let fresh = self
            .auth
            .refresh(&session)
            .await
            .with_context(|| format!("Failed to refresh session for {}", self.email))?;
        if let Some(pool) = &self.session_cache {
            sessions::save(pool, &self.base_url, &fresh).await?;
        }
        *session = fresh;
        Ok(session.access_token.clone())
    }

    async fn fetch_rows(&self, token: &str) -> Result<Vec<StateRow>, reqwest::Error> {
        let url = self.endpoint();
        let user_filter = format!("eq.{}", self.user_id);
        self.retry
            .execute(|| {
                let request = self.authorized(self.http.get(&url), token).query(&[
                    ("select", "state_json"),
                    ("user_id", user_filter.as_str()),
                ]);
                async move { request.send().await?.error_for_status()?.json().await }
            })
            .await
    }

    async fn upsert(&self, token: &str, body: &Value) -> Result<(), reqwest::Error> {
        let url = self.endpoint();
        self.retry
            .execute(|| {
                let request = self
                    .authorized(self.http.post(&url), token)
                    .query(&[("on_conflict", "user_id")])
                    .header("Prefer", "resolution=merge-duplicates,return=minimal")
                    .json(body);
                async move { request.send().await?.error_for_status().map(|_| ()) }
            })
            .await
    }
}

fn is_unauthorized(error: &reqwest::Error) -> bool {
    error.status() == Some(StatusCode::UNAUTHORIZED)
}

#[async_trait]
impl StateStore for RemoteStore {
    fn mode(&self) -> BackendMode {
        BackendMode::Remote
    }

    async fn load(&self) -> Result<Option<AppState>> {
        let token = self.access_token().await?;
        let rows = match self.fetch_rows(&token).await {
            Err(e) if is_unauthorized(&e) => {
                log::warn!("Remote load rejected the access token, retrying after refresh");
                let token = self.refresh(&token).await?;
                self.fetch_rows(&token).await
            }
            other => other,
        }
        .with_context(|| format!("Failed to load remote state for {}", self.email))?;

        let Some(value) = rows.into_iter().next().and_then(|row| row.state_json) else {
            log::info!("No remote snapshot for {}", self.email);
            return Ok(None);
        };

        match AppState::from_value(value) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                log::warn!("Ignoring unreadable remote snapshot: {:#}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        let body = json!([{
            "user_id": self.user_id,
            "state_json": serde_json::to_value(state).context("Failed to serialize ERP state")?,
            "updated_at": Utc::now().to_rfc3339(),
        }]);

        let token = self.access_token().await?;
        match self.upsert(&token, &body).await {
            Err(e) if is_unauthorized(&e) => {
                log::warn!("Remote save rejected the access token, retrying after refresh");
                let token = self.refresh(&token).await?;
                self.upsert(&token, &body).await
            }
            other => other,
        }
        .with_context(|| format!("Failed to save remote state for {}", self.email))?;

        log::debug!("Saved remote snapshot for {}", self.email);
        Ok(())
    }
}
