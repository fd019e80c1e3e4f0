//! Where the ERP aggregate lives between runs
//!
//! A [`StateStore`] loads and saves the whole aggregate as one JSON
//! document. The backend is picked once at startup: the hosted backend
//! when it is configured and a session exists, the local SQLite file
//! otherwise.

pub mod local;
pub mod remote;
pub mod retry;
pub mod scheduler;

pub use local::LocalStore;
pub use remote::RemoteStore;
pub use scheduler::PersistScheduler;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

use crate::state::AppState;

/// Key of the snapshot row in the local `local_state` table
pub const LOCAL_STATE_KEY: &str = "agri_erp_modern_state_v2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    Local,
    Remote,
}

impl BackendMode {
    pub fn label(&self) -> &'static str {
        match self {
            BackendMode::Local => "Local Demo",
            BackendMode::Remote => "Supabase Cloud",
        }
    }
}

impl fmt::Display for BackendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[async_trait]
pub trait StateStore: Send + Sync {
    fn mode(&self) -> BackendMode;

    /// `None` when nothing usable is stored yet
    async fn load(&self) -> Result<Option<AppState>>;

    async fn save(&self, state: &AppState) -> Result<()>;
}
