use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie saved to a user's favorites list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct FavoriteEntry {
    pub user_id: i64,
    pub movie_id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub added_at: DateTime<Utc>,
}

/// Request body for adding a favorite
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewFavorite {
    pub movie_id: i64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}
