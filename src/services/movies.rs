use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    error::{AppError, AppResult},
    models::{DiscoverFilter, Genre, Movie, MovieDetail},
    services::catalog::CatalogClient,
};

/// Discover pages considered when picking a random movie
pub const RANDOM_PAGES: u32 = 50;

pub async fn search(catalog: &dyn CatalogClient, term: &str) -> AppResult<Vec<Movie>> {
    catalog.search(term).await
}

pub async fn movies_by_genre(catalog: &dyn CatalogClient, genre_id: i64) -> AppResult<Vec<Movie>> {
    catalog.discover_by_genre(genre_id).await
}

pub async fn movie_detail(catalog: &dyn CatalogClient, movie_id: i64) -> AppResult<MovieDetail> {
    catalog.movie_detail(movie_id).await
}

pub async fn list_genres(catalog: &dyn CatalogClient) -> AppResult<Vec<Genre>> {
    catalog.genres().await
}

/// A random movie matching the optional genre and year filters
pub async fn random_movie(
    catalog: &dyn CatalogClient,
    genre_id: Option<i64>,
    year: Option<i32>,
) -> AppResult<Movie> {
    let mut rng = StdRng::from_entropy();
    random_movie_with(catalog, genre_id, year, &mut rng).await
}

pub async fn random_movie_with<R: Rng + Send>(
    catalog: &dyn CatalogClient,
    genre_id: Option<i64>,
    year: Option<i32>,
    rng: &mut R,
) -> AppResult<Movie> {
    let filter = DiscoverFilter {
        genre_id,
        year,
        page: rng.gen_range(1..=RANDOM_PAGES),
    };

    let movies = catalog.discover(&filter).await?;
    let movie = movies.choose(rng).cloned().ok_or_else(|| {
        AppError::NotFound("No movie found for the given filters".to_string())
    })?;

    tracing::debug!(page = filter.page, movie_id = movie.id, "Random movie picked");
    Ok(movie)
}
