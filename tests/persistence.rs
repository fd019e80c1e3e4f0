//! Local and hosted snapshot stores, the auth client and the debounced writer

use agri_erp::auth::{AuthClient, AuthSession, SignUpOutcome, build_http_client};
use agri_erp::config::repository::sessions;
use agri_erp::config::{RemoteConfig, db};
use agri_erp::state::AppState;
use agri_erp::storage::retry::{RetryConfig, RetryPolicy};
use agri_erp::storage::{BackendMode, LocalStore, PersistScheduler, RemoteStore, StateStore};
use agri_erp::workflow::{Actor, Erp, WorkflowPolicy};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seeded_state(seed: u64) -> AppState {
    let mut erp = Erp::with_seed(
        AppState::default(),
        Actor::new("admin@factory.com"),
        WorkflowPolicy::default(),
        seed,
    );
    erp.seed();
    erp.into_state()
}

fn remote_config(server: &MockServer) -> RemoteConfig {
    RemoteConfig {
        url: Some(format!("{}/", server.uri())),
        anon_key: Some("anon-key".to_string()),
        ..RemoteConfig::default()
    }
}

fn session() -> AuthSession {
    AuthSession {
        user_id: "user-1".to_string(),
        email: "admin@factory.com".to_string(),
        access_token: "access-1".to_string(),
        refresh_token: "refresh-1".to_string(),
        expires_at: Utc::now() + ChronoDuration::hours(1),
    }
}

fn remote_store(server: &MockServer) -> RemoteStore {
    let remote = remote_config(server);
    let http = build_http_client(&remote).unwrap();
    RemoteStore::new(http, &remote, session(), RetryPolicy::new(RetryConfig::none())).unwrap()
}

#[tokio::test]
async fn test_local_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("state.db");
    let state = seeded_state(1);

    let pool = db::open(&db_path).await.unwrap();
    let store = LocalStore::new(pool.clone());
    assert!(store.load().await.unwrap().is_none());
    store.save(&state).await.unwrap();
    pool.close().await;

    let pool = db::open(&db_path).await.unwrap();
    let loaded = LocalStore::new(pool.clone()).load().await.unwrap();
    assert_eq!(loaded, Some(state));
    pool.close().await;
}

#[tokio::test]
async fn test_remote_store_loads_users_row() {
    let server = MockServer::start().await;
    let state = seeded_state(2);

    Mock::given(method("GET"))
        .and(path("/rest/v1/erp_state"))
        .and(query_param("user_id", "eq.user-1"))
        .and(query_param("select", "state_json"))
        .and(header("apikey", "anon-key"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "state_json": serde_json::to_value(&state).unwrap() }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = remote_store(&server);
    assert_eq!(store.mode(), BackendMode::Remote);
    assert_eq!(store.load().await.unwrap(), Some(state));
}

#[tokio::test]
async fn test_remote_store_without_row_loads_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/erp_state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    assert!(remote_store(&server).load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_remote_store_upserts_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/erp_state"))
        .and(query_param("on_conflict", "user_id"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .and(body_partial_json(json!([{ "user_id": "user-1" }])))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    remote_store(&server).save(&seeded_state(3)).await.unwrap();
}

#[tokio::test]
async fn test_remote_store_reports_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/erp_state"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = remote_store(&server).save(&AppState::default()).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to save remote state"));
}

async fn mount_refresh(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "refresh_token"))
        .and(body_partial_json(json!({ "refresh_token": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-2",
            "refresh_token": "refresh-2",
            "expires_in": 3600,
            "user": { "id": "user-1", "email": "admin@factory.com" }
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_remote_store_refreshes_expired_session_before_saving() {
    let server = MockServer::start().await;
    mount_refresh(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/erp_state"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let remote = remote_config(&server);
    let expired = AuthSession {
        expires_at: Utc::now() - ChronoDuration::minutes(5),
        ..session()
    };
    let pool = db::open_memory().await.unwrap();
    let store = RemoteStore::new(
        build_http_client(&remote).unwrap(),
        &remote,
        expired,
        RetryPolicy::new(RetryConfig::none()),
    )
    .unwrap()
    .with_session_cache(pool.clone());

    store.save(&seeded_state(5)).await.unwrap();

    assert_eq!(store.current_session().await.access_token, "access-2");
    let cached = sessions::get(&pool, &server.uri()).await.unwrap().unwrap();
    assert_eq!(cached.access_token, "access-2");
    assert_eq!(cached.refresh_token, "refresh-2");
    assert!(!cached.is_expired());
}

#[tokio::test]
async fn test_remote_store_retries_once_after_rejected_token() {
    let server = MockServer::start().await;
    mount_refresh(&server).await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/erp_state"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/erp_state"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let store = remote_store(&server);
    assert!(store.load().await.unwrap().is_none());
    assert_eq!(store.current_session().await.access_token, "access-2");
}

#[tokio::test]
async fn test_remote_store_gives_up_when_refreshed_token_is_rejected() {
    let server = MockServer::start().await;
    mount_refresh(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/erp_state"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let err = remote_store(&server).save(&AppState::default()).await.unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to save remote state"));
}

#[tokio::test]
async fn test_sign_in_builds_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "anon-key"))
        .and(body_partial_json(json!({ "email": "qc@factory.com" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "refresh_token": "ref",
            "expires_in": 3600,
            "user": { "id": "u-9", "email": "qc@factory.com" }
        })))
        .mount(&server)
        .await;

    let remote = remote_config(&server);
    let client = AuthClient::new(build_http_client(&remote).unwrap(), &remote).unwrap();
    let session = client.sign_in("qc@factory.com", "secret").await.unwrap();
    assert_eq!(session.user_id, "u-9");
    assert_eq!(session.access_token, "tok");
    assert!(!session.is_expired());
}

#[tokio::test]
async fn test_sign_in_surfaces_auth_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let remote = remote_config(&server);
    let client = AuthClient::new(build_http_client(&remote).unwrap(), &remote).unwrap();
    let err = client.sign_in("qc@factory.com", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid login credentials");
}

#[tokio::test]
async fn test_sign_up_may_need_confirmation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "u-10",
            "email": "new@factory.com"
        })))
        .mount(&server)
        .await;

    let remote = remote_config(&server);
    let client = AuthClient::new(build_http_client(&remote).unwrap(), &remote).unwrap();
    let outcome = client.sign_up("new@factory.com", "secret").await.unwrap();
    assert_eq!(
        outcome,
        SignUpOutcome::ConfirmationRequired {
            email: "new@factory.com".to_string()
        }
    );
}

/// Records every snapshot it is asked to save
#[derive(Default)]
struct RecordingStore {
    saved: Mutex<Vec<usize>>,
    fail: bool,
    mode: Option<BackendMode>,
}

impl RecordingStore {
    fn saves(&self) -> Vec<usize> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl StateStore for RecordingStore {
    fn mode(&self) -> BackendMode {
        self.mode.unwrap_or(BackendMode::Local)
    }

    async fn load(&self) -> Result<Option<AppState>> {
        Ok(None)
    }

    async fn save(&self, state: &AppState) -> Result<()> {
        if self.fail {
            anyhow::bail!("backend unavailable");
        }
        self.saved.lock().unwrap().push(state.enquiries.len());
        Ok(())
    }
}

fn state_with_enquiries(n: usize) -> AppState {
    let mut state = seeded_state(4);
    state.enquiries.truncate(1);
    let template = state.enquiries[0].clone();
    state.enquiries = (0..n)
        .map(|i| {
            let mut e = template.clone();
            e.id = format!("ENQ-{:04}", i);
            e
        })
        .collect();
    state
}

#[tokio::test]
async fn test_scheduler_coalesces_bursts() {
    let store = Arc::new(RecordingStore::default());
    let scheduler = PersistScheduler::spawn(store.clone(), Duration::from_millis(60));

    for n in 1..=5 {
        scheduler.schedule(&state_with_enquiries(n));
    }
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(store.saves(), vec![5]);

    // Nothing pending: flush is a no-op
    scheduler.flush().await.unwrap();
    assert_eq!(store.saves(), vec![5]);

    scheduler.close().await.unwrap();
}

#[tokio::test]
async fn test_flush_writes_pending_snapshot_immediately() {
    let store = Arc::new(RecordingStore::default());
    let scheduler = PersistScheduler::spawn(store.clone(), Duration::from_secs(30));

    scheduler.schedule(&state_with_enquiries(2));
    scheduler.schedule(&state_with_enquiries(3));
    scheduler.flush().await.unwrap();
    assert_eq!(store.saves(), vec![3]);

    scheduler.schedule(&state_with_enquiries(4));
    scheduler.close().await.unwrap();
    assert_eq!(store.saves(), vec![3, 4]);
}

#[tokio::test]
async fn test_remote_write_failures_are_reported() {
    let store = Arc::new(RecordingStore {
        fail: true,
        mode: Some(BackendMode::Remote),
        ..RecordingStore::default()
    });
    let mut scheduler = PersistScheduler::spawn(store, Duration::from_secs(30));
    assert_eq!(scheduler.mode(), BackendMode::Remote);

    scheduler.schedule(&AppState::default());
    scheduler.flush().await.unwrap();
    let failures = scheduler.take_failures();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].contains("backend unavailable"));
    assert!(scheduler.take_failures().is_empty());

    scheduler.close().await.unwrap();
}
