//! User store contract and its PostgreSQL repository

use async_trait::async_trait;
use common::error::StoreResult;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::User;

/// Keyed access to the `users` collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by normalized (lowercased) email
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Find a user by id
    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<User>>;

    /// Insert a freshly created user
    async fn insert(&self, user: &User) -> StoreResult<()>;

    /// Refresh the mutable profile fields on an existing user
    async fn update_profile(&self, email: &str, name: &str, picture: Option<&str>)
        -> StoreResult<()>;
}

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> User {
        User {
            user_id: row.get("user_id"),
            email: row.get("email"),
            name: row.get("name"),
            picture: row.get("picture"),
            created_at: row.get("created_at"),
        }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, name, picture, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, email, name, picture, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        info!("Creating user record for {}", user.email);

        sqlx::query(
            r#"
            INSERT INTO users (user_id, email, name, picture, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&user.user_id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.picture)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_profile(
        &self,
        email: &str,
        name: &str,
        picture: Option<&str>,
    ) -> StoreResult<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET name = $2, picture = $3
            WHERE email = $1
            "#,
        )
        .bind(email)
        .bind(name)
        .bind(picture)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
