pub mod favorites;
pub mod postgres;
pub mod quiz_history;
pub mod ratings;
pub mod redis;
pub mod users;

pub use favorites::{FavoritesStore, PgFavoritesStore};
pub use postgres::create_pool;
pub use quiz_history::{HistoryLock, InMemoryQuizHistory, QuizHistoryStore, RedisQuizHistory};
pub use ratings::{PgRatingsStore, RatingsStore};
pub use self::redis::create_redis_connection;
pub use users::{PgUsersStore, UsersStore};
