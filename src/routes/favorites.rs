use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::AuthUser,
    models::{FavoriteEntry, NewFavorite},
    routes::AppState,
    services::favorites,
};

pub async fn list(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<FavoriteEntry>>> {
    let entries = favorites::list_favorites(state.favorites.as_ref(), user_id).await?;
    Ok(Json(entries))
}

pub async fn add(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(favorite): Json<NewFavorite>,
) -> AppResult<StatusCode> {
    favorites::add_favorite(state.favorites.as_ref(), user_id, &favorite).await?;
    Ok(StatusCode::CREATED)
}

pub async fn remove(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(movie_id): Path<i64>,
) -> AppResult<StatusCode> {
    favorites::remove_favorite(state.favorites.as_ref(), user_id, movie_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
