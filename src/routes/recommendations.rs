use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::{AuthUser, RequestId},
    models::Movie,
    routes::AppState,
};

/// Handler for personalized recommendations
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<Vec<Movie>>> {
    tracing::info!(request_id = %request_id, user_id = user_id, "Processing recommendation request");

    let movies = state.recommender.recommend(user_id).await?;

    tracing::info!(
        request_id = %request_id,
        count = movies.len(),
        "Recommendations completed"
    );

    Ok(Json(movies))
}
