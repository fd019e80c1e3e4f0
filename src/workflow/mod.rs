//! Workflow actions over the ERP aggregate
//!
//! [`Erp`] is the single owner of [`AppState`]. Every action validates the
//! references it needs, mutates or appends records, and writes one audit
//! entry per record it touches. Nothing is rolled back: an action that
//! touches several records applies each mutation in turn.

pub mod access;
pub mod admin;
pub mod documents;
pub mod error;
pub mod finance;
pub mod inspection;
pub mod logistics;
pub mod master_data;
pub mod policy;
pub mod production;
pub mod purchase;
pub mod sales;
pub mod seed;

pub use error::{WorkflowError, WorkflowResult};
pub use policy::WorkflowPolicy;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{AuditAction, AuditEntry, Notification, Severity, ids};
use crate::state::AppState;

/// Email used when nobody is signed in
pub const GUEST_ACTOR: &str = "guest";

const AUDIT_IP: &str = "127.0.0.1";

/// Identity the actions are performed as
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub email: Option<String>,
}

impl Actor {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn guest() -> Self {
        Self { email: None }
    }

    pub fn name(&self) -> &str {
        self.email.as_deref().unwrap_or(GUEST_ACTOR)
    }
}

pub struct Erp {
    state: AppState,
    actor: Actor,
    policy: WorkflowPolicy,
    rng: StdRng,
}

impl Erp {
    pub fn new(state: AppState, actor: Actor, policy: WorkflowPolicy) -> Self {
        Self {
            state,
            actor,
            policy,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic ids, margins and credit checks
    pub fn with_seed(state: AppState, actor: Actor, policy: WorkflowPolicy, seed: u64) -> Self {
        Self {
            state,
            actor,
            policy,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Swaps in a freshly loaded aggregate
    pub fn replace_state(&mut self, state: AppState) {
        self.state = state;
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    fn next_id(&mut self, prefix: &str) -> String {
        let state = &self.state;
        ids::generate_unique(prefix, &mut self.rng, |candidate| state.id_taken(candidate))
    }

    pub(crate) fn audit(
        &mut self,
        action: AuditAction,
        entity_type: &str,
        entity_id: &str,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) {
        let id = self.next_id("AUD");
        let role = self
            .current_user()
            .map(|u| u.role.label().to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        log::debug!("Audit {} {} {}", action, entity_type, entity_id);

        self.state.audit_logs.insert(
            0,
            AuditEntry {
                id,
                actor: self.actor.name().to_string(),
                role,
                timestamp: now(),
                ip: AUDIT_IP.to_string(),
                action,
                entity_type: entity_type.to_string(),
                entity_id: entity_id.to_string(),
                old_value,
                new_value,
            },
        );
    }

    pub fn notify(&mut self, title: &str, body: &str, severity: Severity) {
        let id = self.next_id("NTF");
        self.state.notifications.insert(
            0,
            Notification {
                id,
                title: title.to_string(),
                body: body.to_string(),
                severity,
                at: now(),
            },
        );
    }
}

/// JSON snapshot stored as an audit before/after value
pub(crate) fn snapshot<T: Serialize>(value: &T) -> Option<Value> {
    match serde_json::to_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Failed to snapshot record for audit: {}", e);
            None
        }
    }
}

pub(crate) fn required(field: &str, value: &str) -> WorkflowResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(WorkflowError::InvalidInput(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn non_negative(field: &str, value: f64) -> WorkflowResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(WorkflowError::InvalidInput(format!(
            "{} must be a non-negative number",
            field
        )));
    }
    Ok(value)
}

/// `YYYY-MM-DD HH:MM:SS` in UTC
pub fn now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn today() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}
