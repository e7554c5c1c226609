use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for rating a movie
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RatingInput {
    pub score: i32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl RatingInput {
    pub const MIN_SCORE: i32 = 1;
    pub const MAX_SCORE: i32 = 5;
}

/// A rating as listed on a movie page, with the rater's display name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct MovieRating {
    pub id: i64,
    pub score: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_name: String,
}
