pub mod catalog;
pub mod favorites;
pub mod movies;
pub mod quiz;
pub mod ratings;
pub mod recommendations;
pub mod users;

pub use catalog::{CatalogClient, TmdbClient};
pub use quiz::QuizEngine;
pub use recommendations::RecommendationEngine;
