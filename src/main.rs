use std::sync::Arc;

use cinequiz_api::{
    config::Config,
    db::{
        create_pool, create_redis_connection, InMemoryQuizHistory, PgFavoritesStore,
        PgRatingsStore, PgUsersStore, QuizHistoryStore, RedisQuizHistory,
    },
    routes::{create_router, AppState},
    services::TmdbClient,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinequiz_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    tracing::info!("Connected to PostgreSQL");

    let history: Arc<dyn QuizHistoryStore> = match &config.redis_url {
        Some(url) => {
            let connection = create_redis_connection(url).await?;
            tracing::info!("Quiz history stored in Redis");
            Arc::new(RedisQuizHistory::new(connection))
        }
        None => {
            tracing::info!("Quiz history kept in memory");
            Arc::new(InMemoryQuizHistory::new())
        }
    };

    let state = Arc::new(
        AppState::new(
            Arc::new(TmdbClient::from_config(&config)),
            Arc::new(PgFavoritesStore::new(pool.clone())),
            Arc::new(PgRatingsStore::new(pool.clone())),
            Arc::new(PgUsersStore::new(pool)),
            history,
            &config.jwt_secret,
        )
        .with_bcrypt_cost(config.bcrypt_cost),
    );

    let app = create_router(state, &config.cors_allowed_origin);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
