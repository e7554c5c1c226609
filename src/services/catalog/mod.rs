/// Movie catalog abstraction
///
/// The quiz and recommendation engines only see this trait, so the provider behind it
/// (TMDB in production, mocks in tests) can fail or time out without the engines
/// knowing anything about HTTP.
use crate::{
    error::AppResult,
    models::{DiscoverFilter, Genre, Movie, MovieDetail, Person},
};

pub mod tmdb;

pub use tmdb::TmdbClient;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search movies by free-text term
    async fn search(&self, term: &str) -> AppResult<Vec<Movie>>;

    /// Fetch the full detail of a movie (basic info, credits and videos)
    async fn movie_detail(&self, movie_id: i64) -> AppResult<MovieDetail>;

    /// One page of the provider's popular-people listing
    async fn popular_people(&self, page: u32) -> AppResult<Vec<Person>>;

    /// Popular movies in a genre, most popular first
    async fn discover_by_genre(&self, genre_id: i64) -> AppResult<Vec<Movie>>;

    /// A single discover page with optional genre and year filters
    async fn discover(&self, filter: &DiscoverFilter) -> AppResult<Vec<Movie>>;

    /// All movie genres known to the provider
    async fn genres(&self) -> AppResult<Vec<Genre>>;
}
