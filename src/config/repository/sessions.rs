//! Cached auth sessions, one per backend url

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::auth::AuthSession;

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    user_id: String,
    email: String,
    access_token: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
}

pub async fn save(pool: &SqlitePool, backend_url: &str, session: &AuthSession) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR REPLACE INTO sessions
            (backend_url, user_id, email, access_token, refresh_token, expires_at, created_at)
        VALUES (?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP)
        "#,
    )
    .bind(backend_url)
    .bind(&session.user_id)
    .bind(&session.email)
    .bind(&session.access_token)
    .bind(&session.refresh_token)
    .bind(session.expires_at)
    .execute(pool)
    .await
    .with_context(|| format!("Failed to save session for {}", session.email))?;

    log::info!("Cached session for {}", session.email);
    Ok(())
}

pub async fn get(pool: &SqlitePool, backend_url: &str) -> Result<Option<AuthSession>> {
    let row: Option<SessionRow> = sqlx::query_as(
        r#"
        SELECT user_id, email, access_token, refresh_token, expires_at
        FROM sessions WHERE backend_url = ?
        "#,
    )
    .bind(backend_url)
    .fetch_optional(pool)
    .await
    .context("Failed to read cached session")?;

    Ok(row.map(|r| AuthSession {
        user_id: r.user_id,
        email: r.email,
        access_token: r.access_token,
        refresh_token: r.refresh_token,
        expires_at: r.expires_at,
    }))
}

pub async fn delete(pool: &SqlitePool, backend_url: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE backend_url = ?")
        .bind(backend_url)
        .execute(pool)
        .await
        .context("Failed to delete cached session")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::db;
    use chrono::{Duration, SubsecRound};

    #[tokio::test]
    async fn test_session_round_trip() {
        let pool = db::open_memory().await.unwrap();
        let session = AuthSession {
            user_id: "8c1f-uuid".to_string(),
            email: "admin@factory.com".to_string(),
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: (Utc::now() + Duration::hours(1)).trunc_subsecs(0),
        };

        save(&pool, "https://plant.example.co", &session).await.unwrap();
        let loaded = get(&pool, "https://plant.example.co").await.unwrap().unwrap();
        assert_eq!(loaded, session);
        assert!(get(&pool, "https://other.example.co").await.unwrap().is_none());

        delete(&pool, "https://plant.example.co").await.unwrap();
        assert!(get(&pool, "https://plant.example.co").await.unwrap().is_none());
    }
}
