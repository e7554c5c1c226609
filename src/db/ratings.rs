use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{MovieRating, RatingInput},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RatingsStore: Send + Sync {
    /// Creates or replaces the user's rating for a movie
    async fn upsert(&self, user_id: i64, movie_id: i64, rating: &RatingInput) -> AppResult<()>;

    /// Ratings for a movie, newest first
    async fn list_for_movie(&self, movie_id: i64) -> AppResult<Vec<MovieRating>>;
}

/// Postgres-backed ratings (`ratings` table, unique on `(user_id, movie_id)`)
#[derive(Clone)]
pub struct PgRatingsStore {
    pool: PgPool,
}

impl PgRatingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl RatingsStore for PgRatingsStore {
    async fn upsert(&self, user_id: i64, movie_id: i64, rating: &RatingInput) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO ratings (user_id, movie_id, score, comment)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, movie_id)
            DO UPDATE SET score = EXCLUDED.score, comment = EXCLUDED.comment, created_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(rating.score)
        .bind(&rating.comment)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_for_movie(&self, movie_id: i64) -> AppResult<Vec<MovieRating>> {
        let ratings = sqlx::query_as::<_, MovieRating>(
            r#"
            SELECT r.id, r.score, r.comment, r.created_at, u.name AS user_name
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            WHERE r.movie_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(movie_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ratings)
    }
}
