/// Quiz engine
///
/// Builds one multiple-choice question per call from the user's favorites. Each user
/// rotates through their favorites: a movie is not asked again until every other
/// favorite has been asked once, after which the rotation starts over.
use std::{collections::HashSet, sync::Arc};

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{
    db::{FavoritesStore, QuizHistoryStore},
    error::{AppError, AppResult},
    models::{FavoriteEntry, MovieDetail, QuizQuestion},
    services::catalog::CatalogClient,
};

pub mod distractors;
pub mod strategies;

pub use strategies::QuestionKind;

use distractors::{ACTORS, DIRECTORS};

pub struct QuizEngine {
    favorites: Arc<dyn FavoritesStore>,
    catalog: Arc<dyn CatalogClient>,
    history: Arc<dyn QuizHistoryStore>,
}

impl QuizEngine {
    pub fn new(
        favorites: Arc<dyn FavoritesStore>,
        catalog: Arc<dyn CatalogClient>,
        history: Arc<dyn QuizHistoryStore>,
    ) -> Self {
        Self {
            favorites,
            catalog,
            history,
        }
    }

    /// Generates a question of a uniformly random kind
    pub async fn generate_question(&self, user_id: i64) -> AppResult<QuizQuestion> {
        let mut rng = StdRng::from_entropy();
        let kind = QuestionKind::random(&mut rng);
        self.generate_question_with(user_id, kind, &mut rng).await
    }

    /// Generates a question of the requested kind, falling back to a release-year
    /// question when the kind does not apply to the selected movie
    pub async fn generate_question_with<R: Rng + Send>(
        &self,
        user_id: i64,
        kind: QuestionKind,
        rng: &mut R,
    ) -> AppResult<QuizQuestion> {
        let favorites = match self.favorites.list_for_user(user_id).await {
            Ok(favorites) if !favorites.is_empty() => favorites,
            Ok(_) => return Err(AppError::InsufficientFavorites),
            Err(e) => {
                tracing::warn!(user_id = user_id, error = %e, "Failed to load favorites for quiz");
                return Err(AppError::InsufficientFavorites);
            }
        };

        let detail = self.next_movie(user_id, &favorites, rng).await?;
        let question = self.build_question(&detail, kind, rng).await?;

        tracing::info!(
            user_id = user_id,
            movie_id = detail.id,
            kind = ?kind,
            "Quiz question generated"
        );

        Ok(question)
    }

    /// Picks the next movie from the user's rotation pool and records it, holding the
    /// user's history lock for the whole cycle.
    async fn next_movie<R: Rng + Send>(
        &self,
        user_id: i64,
        favorites: &[FavoriteEntry],
        rng: &mut R,
    ) -> AppResult<MovieDetail> {
        let lock = self.history.lock(user_id).await?;
        let result = self.pick_and_record(user_id, favorites, rng).await;

        if let Err(e) = self.history.unlock(lock).await {
            tracing::warn!(user_id = user_id, error = %e, "Failed to release quiz history lock");
        }

        result
    }

    /// A movie whose detail cannot be fetched is left out of the history so it can be
    /// picked again on the next attempt.
    async fn pick_and_record<R: Rng + Send>(
        &self,
        user_id: i64,
        favorites: &[FavoriteEntry],
        rng: &mut R,
    ) -> AppResult<MovieDetail> {
        let asked: HashSet<i64> = self.history.asked(user_id).await?.into_iter().collect();
        let mut available: Vec<&FavoriteEntry> = favorites
            .iter()
            .filter(|favorite| !asked.contains(&favorite.movie_id))
            .collect();

        if available.is_empty() {
            tracing::info!(
                user_id = user_id,
                favorites = favorites.len(),
                "Quiz rotation exhausted, starting over"
            );
            self.history.reset(user_id).await?;
            available = favorites.iter().collect();
        }

        let movie_id = available
            .choose(rng)
            .map(|favorite| favorite.movie_id)
            .ok_or(AppError::InsufficientFavorites)?;

        let detail = self.catalog.movie_detail(movie_id).await.map_err(|e| {
            if matches!(e, AppError::NotFound(_)) {
                tracing::warn!(
                    user_id = user_id,
                    movie_id = movie_id,
                    "Favorite no longer exists in the catalog"
                );
            } else {
                tracing::warn!(user_id = user_id, movie_id = movie_id, error = %e, "Quiz movie detail fetch failed");
            }
            AppError::DetailFetchFailed {
                movie_id,
                reason: e.to_string(),
            }
        })?;

        self.history.record(user_id, movie_id).await?;

        Ok(detail)
    }

    async fn build_question<R: Rng + Send>(
        &self,
        detail: &MovieDetail,
        kind: QuestionKind,
        rng: &mut R,
    ) -> AppResult<QuizQuestion> {
        let question = match kind {
            QuestionKind::ReleaseYear => None,
            QuestionKind::Director => self.director_question(detail, rng).await,
            QuestionKind::Cast => self.cast_question(detail, rng).await,
            QuestionKind::Genre => strategies::genre_question(detail, rng),
        };

        match question {
            Some(question) => Ok(question),
            None => {
                if kind != QuestionKind::ReleaseYear {
                    tracing::debug!(
                        movie_id = detail.id,
                        kind = ?kind,
                        "Question kind not applicable, falling back to release year"
                    );
                }
                strategies::release_year_question(detail, rng)
            }
        }
    }

    async fn director_question<R: Rng + Send>(
        &self,
        detail: &MovieDetail,
        rng: &mut R,
    ) -> Option<QuizQuestion> {
        let director = strategies::director_of(detail)?;
        let distractors = DIRECTORS
            .pick(self.catalog.as_ref(), &[director], rng)
            .await;
        strategies::director_question(detail, &distractors, rng)
    }

    async fn cast_question<R: Rng + Send>(
        &self,
        detail: &MovieDetail,
        rng: &mut R,
    ) -> Option<QuizQuestion> {
        let answer = strategies::cast_answer(detail, rng)?;
        let cast: Vec<&str> = detail.cast.iter().map(|m| m.name.as_str()).collect();
        let distractors = ACTORS.pick(self.catalog.as_ref(), &cast, rng).await;
        strategies::cast_question(detail, answer, &distractors, rng)
    }
}
