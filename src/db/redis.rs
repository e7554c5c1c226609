use redis::{aio::ConnectionManager, Client};

/// Opens a managed Redis connection for the shared quiz history
///
/// The connection manager reconnects on its own and is cheap to clone per command.
pub async fn create_redis_connection(redis_url: &str) -> anyhow::Result<ConnectionManager> {
    let client = Client::open(redis_url)?;
    let manager = ConnectionManager::new(client).await?;
    Ok(manager)
}
