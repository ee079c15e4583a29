//! Session store contract and its PostgreSQL repository

use async_trait::async_trait;
use common::error::StoreResult;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::Session;

/// Keyed access to the `sessions` collection.
///
/// Expired rows are never purged here; callers filter them at read time.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Insert a freshly issued session
    async fn insert(&self, session: &Session) -> StoreResult<()>;

    /// Look a session up by its opaque token
    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>>;

    /// Delete every session belonging to a user, returning the count removed
    async fn delete_for_user(&self, user_id: &str) -> StoreResult<u64>;

    /// Delete every session carrying the given token, returning the count removed
    async fn delete_by_token(&self, token: &str) -> StoreResult<u64>;
}

/// Session repository backed by PostgreSQL
#[derive(Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn insert(&self, session: &Session) -> StoreResult<()> {
        info!("Creating session for user {}", session.user_id);

        sqlx::query(
            r#"
            INSERT INTO sessions (user_id, session_token, expires_at, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&session.user_id)
        .bind(&session.session_token)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, session_token, expires_at, created_at
            FROM sessions
            WHERE session_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Session {
            user_id: row.get("user_id"),
            session_token: row.get("session_token"),
            expires_at: row.get("expires_at"),
            created_at: row.get("created_at"),
        }))
    }

    async fn delete_for_user(&self, user_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
