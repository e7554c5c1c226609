use crate::{
    db::RatingsStore,
    error::{AppError, AppResult},
    models::{MovieRating, RatingInput},
};

/// Creates or replaces the user's rating of a movie
pub async fn rate_movie(
    store: &dyn RatingsStore,
    user_id: i64,
    movie_id: i64,
    rating: &RatingInput,
) -> AppResult<()> {
    if !(RatingInput::MIN_SCORE..=RatingInput::MAX_SCORE).contains(&rating.score) {
        return Err(AppError::InvalidInput(format!(
            "Score must be between {} and {}",
            RatingInput::MIN_SCORE,
            RatingInput::MAX_SCORE
        )));
    }

    store.upsert(user_id, movie_id, rating).await?;

    tracing::info!(
        user_id = user_id,
        movie_id = movie_id,
        score = rating.score,
        "Movie rated"
    );
    Ok(())
}

pub async fn list_ratings(store: &dyn RatingsStore, movie_id: i64) -> AppResult<Vec<MovieRating>> {
    store.list_for_movie(movie_id).await
}
