use std::{sync::Arc, time::Duration};

use dashmap::DashMap;
use redis::{aio::ConnectionManager, AsyncCommands, Script};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Expiry of a Redis rotation lock, so a crashed holder cannot block a user forever
const LOCK_TTL_MS: u64 = 10_000;

/// How long a request waits for another holder before giving up
const LOCK_WAIT: Duration = Duration::from_secs(10);

const LOCK_POLL: Duration = Duration::from_millis(25);

/// Deletes the lock key only while it still holds our token
const RELEASE_SCRIPT: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
end
return 0
"#;

/// Exclusive hold on one user's rotation, returned by [`QuizHistoryStore::lock`]
pub enum HistoryLock {
    Local(OwnedMutexGuard<()>),
    Redis { user_id: i64, token: String },
}

/// Per-user record of which favorites have already been used in quiz questions.
///
/// A pick reads the history, chooses a movie and appends it. Callers hold the user's
/// [`HistoryLock`] across that whole cycle; the lock lives in the store, so every
/// process sharing the store also shares the lock.
#[async_trait::async_trait]
pub trait QuizHistoryStore: Send + Sync {
    /// Waits for exclusive access to the user's history
    async fn lock(&self, user_id: i64) -> AppResult<HistoryLock>;

    /// Gives up a lock obtained from [`QuizHistoryStore::lock`]
    async fn unlock(&self, lock: HistoryLock) -> AppResult<()>;

    /// Movie ids already asked to the user, in the order they were asked
    async fn asked(&self, user_id: i64) -> AppResult<Vec<i64>>;

    /// Appends a movie id to the user's history
    async fn record(&self, user_id: i64, movie_id: i64) -> AppResult<()>;

    /// Clears the user's history, starting a new rotation
    async fn reset(&self, user_id: i64) -> AppResult<()>;
}

/// Process-local history; lost on restart and not shared between instances
#[derive(Default)]
pub struct InMemoryQuizHistory {
    entries: DashMap<i64, Vec<i64>>,
    /// Never evicted; one entry per user that ever asked for a question
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl InMemoryQuizHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl QuizHistoryStore for InMemoryQuizHistory {
    async fn lock(&self, user_id: i64) -> AppResult<HistoryLock> {
        // Clone out of the map so no shard guard is held across the await
        let mutex = self.locks.entry(user_id).or_default().clone();
        Ok(HistoryLock::Local(mutex.lock_owned().await))
    }

    async fn unlock(&self, lock: HistoryLock) -> AppResult<()> {
        drop(lock);
        Ok(())
    }

    async fn asked(&self, user_id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .entries
            .get(&user_id)
            .map(|entry| entry.clone())
            .unwrap_or_default())
    }

    async fn record(&self, user_id: i64, movie_id: i64) -> AppResult<()> {
        self.entries.entry(user_id).or_default().push(movie_id);
        Ok(())
    }

    async fn reset(&self, user_id: i64) -> AppResult<()> {
        if let Some(mut entry) = self.entries.get_mut(&user_id) {
            entry.clear();
        }
        Ok(())
    }
}

/// History shared by every instance through one Redis list per user.
///
/// The rotation lock is a `SET NX PX` key next to the list, released with a
/// compare-and-delete script so an expired holder cannot free someone else's lock.
#[derive(Clone)]
pub struct RedisQuizHistory {
    connection: ConnectionManager,
}

impl RedisQuizHistory {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    fn key(user_id: i64) -> String {
        format!("quiz:history:{}", user_id)
    }

    fn lock_key(user_id: i64) -> String {
        format!("quiz:lock:{}", user_id)
    }
}

#[async_trait::async_trait]
impl QuizHistoryStore for RedisQuizHistory {
    async fn lock(&self, user_id: i64) -> AppResult<HistoryLock> {
        let mut conn = self.connection.clone();
        let key = Self::lock_key(user_id);
        let token = Uuid::new_v4().to_string();
        let deadline = tokio::time::Instant::now() + LOCK_WAIT;

        loop {
            let acquired: Option<String> = redis::cmd("SET")
                .arg(&key)
                .arg(&token)
                .arg("NX")
                .arg("PX")
                .arg(LOCK_TTL_MS)
                .query_async(&mut conn)
                .await?;

            if acquired.is_some() {
                return Ok(HistoryLock::Redis { user_id, token });
            }

            if tokio::time::Instant::now() >= deadline {
                tracing::warn!(user_id = user_id, "Timed out waiting for quiz history lock");
                return Err(AppError::Internal(format!(
                    "Quiz history for user {} is busy",
                    user_id
                )));
            }

            tokio::time::sleep(LOCK_POLL).await;
        }
    }

    async fn unlock(&self, lock: HistoryLock) -> AppResult<()> {
        let HistoryLock::Redis { user_id, token } = lock else {
            return Ok(());
        };

        let mut conn = self.connection.clone();
        let released: i32 = Script::new(RELEASE_SCRIPT)
            .key(Self::lock_key(user_id))
            .arg(token)
            .invoke_async(&mut conn)
            .await?;

        if released == 0 {
            tracing::warn!(user_id = user_id, "Quiz history lock expired before release");
        }
        Ok(())
    }

    async fn asked(&self, user_id: i64) -> AppResult<Vec<i64>> {
        let mut conn = self.connection.clone();
        let ids: Vec<i64> = conn.lrange(Self::key(user_id), 0, -1).await?;
        Ok(ids)
    }

    async fn record(&self, user_id: i64, movie_id: i64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.rpush(Self::key(user_id), movie_id).await?;
        Ok(())
    }

    async fn reset(&self, user_id: i64) -> AppResult<()> {
        let mut conn = self.connection.clone();
        let _: () = conn.del(Self::key(user_id)).await?;
        Ok(())
    }
}
