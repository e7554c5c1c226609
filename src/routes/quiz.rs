use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::{AuthUser, RequestId},
    models::QuizQuestion,
    routes::AppState,
};

/// Handler for the next quiz question of the caller
pub async fn question(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    AuthUser(user_id): AuthUser,
) -> AppResult<Json<QuizQuestion>> {
    tracing::info!(request_id = %request_id, user_id = user_id, "Generating quiz question");

    let question = state.quiz.generate_question(user_id).await?;
    Ok(Json(question))
}
