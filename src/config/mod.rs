//! TOML settings plus the local SQLite database
//!
//! `config.toml` holds the remote backend, persistence tuning, business
//! policy and the local actor. Environment variables (optionally from a
//! `.env` file) override the remote settings and the actor.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod db;
pub mod migrations;
pub mod repository;

use crate::workflow::WorkflowPolicy;

const APP_DIR: &str = "agri-erp";

pub const ENV_REMOTE_URL: &str = "AGRI_ERP_REMOTE_URL";
pub const ENV_REMOTE_ANON_KEY: &str = "AGRI_ERP_REMOTE_ANON_KEY";
pub const ENV_ACTOR: &str = "AGRI_ERP_ACTOR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "erp_state".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl RemoteConfig {
    /// Url and key when both are set and non-empty
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.anon_key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((url.trim_end_matches('/'), key))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Quiet period before a pending snapshot is written
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    /// Overrides `<data dir>/agri-erp/state.db`
    pub db_path: Option<PathBuf>,
}

fn default_debounce_ms() -> u64 {
    350
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    500
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            retry_attempts: default_retry_attempts(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            db_path: None,
        }
    }
}

impl PersistenceConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Identity used for audit entries when running without the remote backend
    #[serde(default = "default_local_actor")]
    pub local_actor: String,
}

fn default_local_actor() -> String {
    "guest@local".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            local_actor: default_local_actor(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub persistence: PersistenceConfig,
    #[serde(default)]
    pub policy: WorkflowPolicy,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// `~/.config/agri-erp` on Linux, `~/.agri-erp` elsewhere
    pub fn config_dir() -> Result<PathBuf> {
        let dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };
        ensure_dir(&dir)?;
        Ok(dir)
    }

    /// `~/.local/share/agri-erp` on Linux, `~/.agri-erp` elsewhere
    pub fn data_dir() -> Result<PathBuf> {
        let dir = if cfg!(target_os = "linux") {
            dirs::data_dir()
                .context("Failed to get XDG data directory")?
                .join(APP_DIR)
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };
        ensure_dir(&dir)?;
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn db_path(&self) -> Result<PathBuf> {
        match &self.persistence.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("state.db")),
        }
    }

    /// Reads `config.toml`, writing the defaults first when it does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", path);
        if !path.exists() {
            info!("Config file doesn't exist, creating default config");
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config TOML")
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))?;
        info!("Config saved to {:?}", path);
        Ok(())
    }

    /// Lets `AGRI_ERP_*` variables win over the file
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_REMOTE_URL) {
            debug!("Remote url taken from {}", ENV_REMOTE_URL);
            self.remote.url = Some(url);
        }
        if let Some(key) = non_empty(ENV_REMOTE_ANON_KEY) {
            self.remote.anon_key = Some(key);
        }
        if let Some(actor) = non_empty(ENV_ACTOR) {
            self.session.local_actor = actor;
        }
    }

    pub fn remote_enabled(&self) -> bool {
        self.remote.credentials().is_some()
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {:?}", dir))?;
        info!("Created directory: {:?}", dir);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            [policy]
            auto_approve_margin = 12

            [remote]
            url = "https://plant.example.co"
            "#,
        )
        .unwrap();

        assert_eq!(config.policy.auto_approve_margin, 12);
        assert_eq!(config.policy.quotation_validity_days, 7);
        assert_eq!(config.persistence.debounce_ms, 350);
        assert_eq!(config.remote.table, "erp_state");
        assert_eq!(config.session.local_actor, "guest@local");
        assert!(!config.remote_enabled());
    }

    #[test]
    fn test_env_overrides_remote_and_actor() {
        let vars: HashMap<&str, &str> = [
            (ENV_REMOTE_URL, "https://abc.example.co/"),
            (ENV_REMOTE_ANON_KEY, "anon-key"),
            (ENV_ACTOR, "ops@factory.com"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_env(|k| vars.get(k).map(|v| v.to_string()));

        assert!(config.remote_enabled());
        assert_eq!(
            config.remote.credentials(),
            Some(("https://abc.example.co", "anon-key"))
        );
        assert_eq!(config.session.local_actor, "ops@factory.com");
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }
}
