/// TMDB catalog client
///
/// Every request carries the API key and the configured language. Poster paths are
/// expanded to absolute URLs before anything leaves this module.
///
/// API Flow for a movie detail:
/// 1. `/movie/{id}` → title, overview, release date, genres
/// 2. `/movie/{id}/credits` → cast and crew
/// 3. `/movie/{id}/videos` → trailers
///
/// The three requests run concurrently and the first failure fails the whole detail.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{
        tmdb::{
            assemble_detail, TmdbCredits, TmdbGenreList, TmdbMovie, TmdbPage, TmdbPeoplePage,
            TmdbVideos,
        },
        DiscoverFilter, Genre, Movie, MovieDetail, Person,
    },
    services::catalog::CatalogClient,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

const POPULARITY_DESC: &str = "popularity.desc";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
    language: String,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, image_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
            language,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_url.clone(),
            config.tmdb_language.clone(),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// GET a TMDB endpoint and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        tracing::debug!(path = %path, "TMDB request");

        let response = self
            .http_client
            .get(self.url(path))
            .query(&query)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB resource {} not found", path)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(path = %path, status = %status, body = %body, "TMDB request failed");
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            tracing::error!(path = %path, error = %e, "Failed to decode TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn discover_page(&self, params: Vec<(&str, String)>) -> AppResult<Vec<Movie>> {
        let page: TmdbPage<TmdbMovie> = self.get_json("/discover/movie", &params).await?;
        Ok(self.into_movies(page))
    }

    fn into_movies(&self, page: TmdbPage<TmdbMovie>) -> Vec<Movie> {
        page.results
            .into_iter()
            .map(|movie| movie.into_movie(&self.image_url))
            .collect()
    }
}

/// Query parameters for `/discover/movie`
fn discover_params(filter: &DiscoverFilter) -> Vec<(&'static str, String)> {
    let mut params = vec![("sort_by", POPULARITY_DESC.to_string())];
    if let Some(genre_id) = filter.genre_id {
        params.push(("with_genres", genre_id.to_string()));
    }
    if let Some(year) = filter.year {
        params.push(("primary_release_year", year.to_string()));
    }
    if filter.page > 0 {
        params.push(("page", filter.page.to_string()));
    }
    params
}

#[async_trait::async_trait]
impl CatalogClient for TmdbClient {
    async fn search(&self, term: &str) -> AppResult<Vec<Movie>> {
        if term.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search term cannot be empty".to_string(),
            ));
        }

        let page: TmdbPage<TmdbMovie> = self
            .get_json("/search/movie", &[("query", term.to_string())])
            .await?;
        let movies = self.into_movies(page);

        tracing::info!(term = %term, results = movies.len(), "Movie search completed");

        Ok(movies)
    }

    async fn movie_detail(&self, movie_id: i64) -> AppResult<MovieDetail> {
        let basic_path = format!("/movie/{}", movie_id);
        let credits_path = format!("/movie/{}/credits", movie_id);
        let videos_path = format!("/movie/{}/videos", movie_id);

        let (basic, credits, videos) = tokio::try_join!(
            self.get_json::<TmdbMovie>(&basic_path, &[]),
            self.get_json::<TmdbCredits>(&credits_path, &[]),
            self.get_json::<TmdbVideos>(&videos_path, &[]),
        )?;

        let detail = assemble_detail(basic, credits, videos, &self.image_url);

        tracing::debug!(
            movie_id = movie_id,
            genres = detail.genres.len(),
            cast = detail.cast.len(),
            has_director = detail.director.is_some(),
            "Movie detail fetched"
        );

        Ok(detail)
    }

    async fn popular_people(&self, page: u32) -> AppResult<Vec<Person>> {
        let people: TmdbPeoplePage = self
            .get_json("/person/popular", &[("page", page.to_string())])
            .await?;
        Ok(people.results)
    }

    async fn discover_by_genre(&self, genre_id: i64) -> AppResult<Vec<Movie>> {
        let filter = DiscoverFilter {
            genre_id: Some(genre_id),
            ..DiscoverFilter::default()
        };
        self.discover_page(discover_params(&filter)).await
    }

    async fn discover(&self, filter: &DiscoverFilter) -> AppResult<Vec<Movie>> {
        self.discover_page(discover_params(filter)).await
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let list: TmdbGenreList = self.get_json("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }
}
