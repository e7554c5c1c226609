use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{FavoriteEntry, NewFavorite},
};

/// Read/write access to users' favorites lists
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FavoritesStore: Send + Sync {
    /// All favorites of a user, oldest first
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<FavoriteEntry>>;

    /// Inserts a favorite; returns `false` when the pair already existed
    async fn insert(&self, user_id: i64, favorite: &NewFavorite) -> AppResult<bool>;

    /// Removes a favorite; returns `false` when there was nothing to remove
    async fn remove(&self, user_id: i64, movie_id: i64) -> AppResult<bool>;
}

/// Postgres-backed favorites (`favorites` table, unique on `(user_id, movie_id)`)
#[derive(Clone)]
pub struct PgFavoritesStore {
    pool: PgPool,
}

impl PgFavoritesStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FavoritesStore for PgFavoritesStore {
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<FavoriteEntry>> {
        let favorites = sqlx::query_as::<_, FavoriteEntry>(
            r#"
            SELECT user_id, movie_id, title, poster_path, added_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY added_at, movie_id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    async fn insert(&self, user_id: i64, favorite: &NewFavorite) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, movie_id, title, poster_path)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, movie_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(favorite.movie_id)
        .bind(&favorite.title)
        .bind(&favorite.poster_path)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, user_id: i64, movie_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
