use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{MovieRating, RatingInput},
    routes::AppState,
    services::ratings,
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<Vec<MovieRating>>> {
    let ratings = ratings::list_ratings(state.ratings.as_ref(), movie_id).await?;
    Ok(Json(ratings))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(movie_id): Path<i64>,
    Json(input): Json<RatingInput>,
) -> AppResult<StatusCode> {
    ratings::rate_movie(state.ratings.as_ref(), user_id, movie_id, &input).await?;
    Ok(StatusCode::CREATED)
}
