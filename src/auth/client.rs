//! REST calls to `{url}/auth/v1`

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration as StdDuration;

use super::AuthSession;
use crate::config::RemoteConfig;

const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Pooled client shared by auth and the remote store
pub fn build_http_client(remote: &RemoteConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(StdDuration::from_secs(90))
        .timeout(remote.timeout())
        .connect_timeout(StdDuration::from_secs(10))
        .user_agent(concat!("agri-erp/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self, fallback_email: &str) -> AuthSession {
        AuthSession {
            user_id: self.user.id,
            email: self.user.email.unwrap_or_else(|| fallback_email.to_string()),
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: Utc::now() + Duration::seconds(self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN)),
        }
    }
}

/// Result of a sign-up: signed in immediately, or waiting for email confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum SignUpOutcome {
    SignedIn(AuthSession),
    ConfirmationRequired { email: String },
}

pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(http: reqwest::Client, remote: &RemoteConfig) -> Result<Self> {
        let (url, key) = remote
            .credentials()
            .context("Remote backend url and anon key are not configured")?;
        Ok(Self {
            http,
            base_url: url.to_string(),
            anon_key: key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        log::info!("Signing in {}", email);
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to reach auth service")?;

        let token: TokenResponse = read_json(response).await?;
        Ok(token.into_session(email))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        log::info!("Creating account for {}", email);
        let response = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to reach auth service")?;

        let body: Value = read_json(response).await?;
        if body.get("access_token").is_some() {
            let token: TokenResponse =
                serde_json::from_value(body).context("Unexpected sign-up response")?;
            return Ok(SignUpOutcome::SignedIn(token.into_session(email)));
        }
        Ok(SignUpOutcome::ConfirmationRequired {
            email: email.to_string(),
        })
    }

    pub async fn refresh(&self, session: &AuthSession) -> Result<AuthSession> {
        log::debug!("Refreshing session for {}", session.email);
        let response = self
            .http
            .post(self.endpoint("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "refresh_token": session.refresh_token }))
            .send()
            .await
            .context("Failed to reach auth service")?;

        let token: TokenResponse = read_json(response).await?;
        Ok(token.into_session(&session.email))
    }

    pub async fn sign_out(&self, session: &AuthSession) -> Result<()> {
        log::info!("Signing out {}", session.email);
        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .context("Failed to reach auth service")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("{}", error_message(status, &text));
        }
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let text = response
        .text()
        .await
        .context("Failed to read auth response")?;
    log::debug!("Auth response status: {}", status);

    if !status.is_success() {
        anyhow::bail!("{}", error_message(status, &text));
    }
    serde_json::from_str(&text).context("Unexpected auth response")
}

/// Human readable message from an auth error body
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| format!("Authentication failed ({})", status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_message_prefers_description() {
        let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "Invalid login credentials"
        );
        assert_eq!(
            error_message(StatusCode::UNPROCESSABLE_ENTITY, r#"{"msg":"User already registered"}"#),
            "User already registered"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>"),
            "Authentication failed (502 Bad Gateway)"
        );
    }
}
