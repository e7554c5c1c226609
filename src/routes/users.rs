use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Registration, User},
    routes::AppState,
    services::users,
};

/// Handler for account creation
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(registration): Json<Registration>,
) -> AppResult<(StatusCode, Json<User>)> {
    let user = users::register(state.users.as_ref(), &registration, state.bcrypt_cost).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
