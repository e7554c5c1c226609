use axum::{
    http::{HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultOnResponse, TraceLayer},
};

use crate::{
    db::{FavoritesStore, QuizHistoryStore, RatingsStore, UsersStore},
    middleware::{make_span_with_request_id, request_id_middleware, TokenValidator},
    services::{CatalogClient, QuizEngine, RecommendationEngine},
};

pub mod favorites;
pub mod movies;
pub mod quiz;
pub mod ratings;
pub mod recommendations;
pub mod users;

/// Shared state handed to every handler
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    pub favorites: Arc<dyn FavoritesStore>,
    pub ratings: Arc<dyn RatingsStore>,
    pub users: Arc<dyn UsersStore>,
    pub quiz: QuizEngine,
    pub recommender: RecommendationEngine,
    pub tokens: TokenValidator,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        favorites: Arc<dyn FavoritesStore>,
        ratings: Arc<dyn RatingsStore>,
        users: Arc<dyn UsersStore>,
        history: Arc<dyn QuizHistoryStore>,
        jwt_secret: &str,
    ) -> Self {
        Self {
            quiz: QuizEngine::new(favorites.clone(), catalog.clone(), history),
            recommender: RecommendationEngine::new(favorites.clone(), catalog.clone()),
            catalog,
            favorites,
            ratings,
            users,
            tokens: TokenValidator::new(jwt_secret),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

/// Creates the application router with all routes and layers
pub fn create_router(state: Arc<AppState>, cors_allowed_origin: &str) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(axum_middleware::from_fn(request_id_middleware))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_span_with_request_id)
                        .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                )
                .layer(cors_layer(cors_allowed_origin)),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(users::register))
        .route("/movies/search", get(movies::search))
        .route("/movies/discover", get(movies::by_genre))
        .route("/movies/random", get(movies::random))
        .route("/genres", get(movies::genres))
        .route("/movies/:id", get(movies::detail))
        .route(
            "/movies/:id/ratings",
            get(ratings::list).post(ratings::create),
        )
        .route("/favorites", get(favorites::list).post(favorites::add))
        .route("/favorites/:movie_id", delete(favorites::remove))
        .route("/recommendations", get(recommendations::recommend))
        .route("/quiz/question", get(quiz::question))
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
        ]);

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin = %origin, "Invalid CORS origin, cross-origin requests disabled");
            layer
        }
    }
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
