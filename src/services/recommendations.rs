use std::{collections::HashMap, sync::Arc};

use futures::future::join_all;

use crate::{
    db::FavoritesStore,
    error::AppResult,
    models::{Genre, Movie, MovieDetail},
    services::catalog::CatalogClient,
};

/// Recommends movies from the genre that dominates a user's favorites.
///
/// Steps:
/// 1. Load the user's favorites
/// 2. Fetch every favorite's detail concurrently, skipping failures
/// 3. Count genres, once per movie
/// 4. Discover popular movies in the top genre and drop ones already favorited
pub struct RecommendationEngine {
    favorites: Arc<dyn FavoritesStore>,
    catalog: Arc<dyn CatalogClient>,
}

impl RecommendationEngine {
    pub fn new(favorites: Arc<dyn FavoritesStore>, catalog: Arc<dyn CatalogClient>) -> Self {
        Self { favorites, catalog }
    }

    pub async fn recommend(&self, user_id: i64) -> AppResult<Vec<Movie>> {
        let favorites = self.favorites.list_for_user(user_id).await?;
        if favorites.is_empty() {
            return Ok(vec![]);
        }

        let fetches = favorites.iter().map(|favorite| async move {
            let result = self.catalog.movie_detail(favorite.movie_id).await;
            (favorite.movie_id, result)
        });

        let details: Vec<MovieDetail> = join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(movie_id, result)| match result {
                Ok(detail) => Some(detail),
                Err(e) => {
                    tracing::warn!(
                        user_id = user_id,
                        movie_id = movie_id,
                        error = %e,
                        "Skipping favorite with unavailable details"
                    );
                    None
                }
            })
            .collect();

        let mut tally = GenreTally::default();
        for detail in &details {
            tally.add_movie(&detail.genres);
        }

        let Some(genre) = tally.dominant() else {
            tracing::info!(user_id = user_id, "No genres found among favorites");
            return Ok(vec![]);
        };

        let favorite_ids: Vec<i64> = favorites.iter().map(|f| f.movie_id).collect();
        let recommendations: Vec<Movie> = self
            .catalog
            .discover_by_genre(genre.id)
            .await?
            .into_iter()
            .filter(|movie| !favorite_ids.contains(&movie.id))
            .collect();

        tracing::info!(
            user_id = user_id,
            genre = %genre.name,
            favorites = favorites.len(),
            results = recommendations.len(),
            "Recommendations generated"
        );

        Ok(recommendations)
    }
}

/// Genre counts in first-seen order
#[derive(Debug, Default)]
pub struct GenreTally {
    counts: HashMap<i64, usize>,
    order: Vec<Genre>,
}

impl GenreTally {
    /// Counts each distinct genre of one movie once
    pub fn add_movie(&mut self, genres: &[Genre]) {
        let mut seen: Vec<i64> = Vec::with_capacity(genres.len());
        for genre in genres {
            if seen.contains(&genre.id) {
                continue;
            }
            seen.push(genre.id);

            let count = self.counts.entry(genre.id).or_insert(0);
            if *count == 0 {
                self.order.push(genre.clone());
            }
            *count += 1;
        }
    }

    /// Most frequent genre; ties go to the genre encountered first
    pub fn dominant(&self) -> Option<&Genre> {
        let mut best: Option<(&Genre, usize)> = None;
        for genre in &self.order {
            let count = self.counts.get(&genre.id).copied().unwrap_or(0);
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((genre, count)),
            }
        }
        best.map(|(genre, _)| genre)
    }
}
