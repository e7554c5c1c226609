use crate::{
    db::FavoritesStore,
    error::{AppError, AppResult},
    models::{FavoriteEntry, NewFavorite},
};

/// Adds a movie to the user's favorites
pub async fn add_favorite(
    store: &dyn FavoritesStore,
    user_id: i64,
    favorite: &NewFavorite,
) -> AppResult<()> {
    if favorite.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    if !store.insert(user_id, favorite).await? {
        return Err(AppError::Conflict(format!(
            "Movie {} is already a favorite",
            favorite.movie_id
        )));
    }

    tracing::info!(user_id = user_id, movie_id = favorite.movie_id, "Favorite added");
    Ok(())
}

pub async fn list_favorites(
    store: &dyn FavoritesStore,
    user_id: i64,
) -> AppResult<Vec<FavoriteEntry>> {
    store.list_for_user(user_id).await
}

/// Removes a movie from the user's favorites
pub async fn remove_favorite(
    store: &dyn FavoritesStore,
    user_id: i64,
    movie_id: i64,
) -> AppResult<()> {
    if !store.remove(user_id, movie_id).await? {
        return Err(AppError::NotFound(format!(
            "Movie {} is not in favorites",
            movie_id
        )));
    }

    tracing::info!(user_id = user_id, movie_id = movie_id, "Favorite removed");
    Ok(())
}
