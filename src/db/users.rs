use sqlx::PgPool;

use crate::{error::AppResult, models::User};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait UsersStore: Send + Sync {
    /// Creates an account; returns `None` when the email is already registered
    async fn create(&self, name: &str, email: &str, password_hash: &str)
        -> AppResult<Option<User>>;
}

/// Postgres-backed accounts (`users` table, unique on `email`)
#[derive(Clone)]
pub struct PgUsersStore {
    pool: PgPool,
}

impl PgUsersStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UsersStore for PgUsersStore {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, name, email, created_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
