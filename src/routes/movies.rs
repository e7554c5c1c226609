use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Genre, Movie, MovieDetail},
    routes::AppState,
    services::movies,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
}

#[derive(Debug, Deserialize)]
pub struct GenreQuery {
    genre_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct RandomQuery {
    genre_id: Option<i64>,
    year: Option<i32>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = movies::search(state.catalog.as_ref(), &params.q).await?;
    Ok(Json(movies))
}

pub async fn by_genre(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenreQuery>,
) -> AppResult<Json<Vec<Movie>>> {
    let movies = movies::movies_by_genre(state.catalog.as_ref(), params.genre_id).await?;
    Ok(Json(movies))
}

pub async fn random(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RandomQuery>,
) -> AppResult<Json<Movie>> {
    let movie = movies::random_movie(state.catalog.as_ref(), params.genre_id, params.year).await?;
    Ok(Json(movie))
}

pub async fn genres(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Genre>>> {
    let genres = movies::list_genres(state.catalog.as_ref()).await?;
    Ok(Json(genres))
}

pub async fn detail(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> AppResult<Json<MovieDetail>> {
    let detail = movies::movie_detail(state.catalog.as_ref(), movie_id).await?;
    Ok(Json(detail))
}
