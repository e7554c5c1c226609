use std::sync::{Arc, Mutex};

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use cinequiz_api::{
    db::{FavoritesStore, InMemoryQuizHistory, RatingsStore, UsersStore},
    error::{AppError, AppResult},
    middleware::auth::Claims,
    models::{
        CastMember, DiscoverFilter, FavoriteEntry, Genre, Movie, MovieDetail, MovieRating,
        NewFavorite, Person, RatingInput, User,
    },
    routes::{create_router, AppState},
    services::CatalogClient,
};

const SECRET: &str = "integration-secret";

struct FakeCatalog;

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: String::new(),
        release_date: "1999-03-31".to_string(),
        poster_url: None,
        vote_average: 8.2,
    }
}

fn action() -> Genre {
    Genre {
        id: 28,
        name: "Action".to_string(),
    }
}

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn search(&self, term: &str) -> AppResult<Vec<Movie>> {
        if term.trim().is_empty() {
            return Err(AppError::InvalidInput("Search term cannot be empty".to_string()));
        }
        Ok(vec![movie(603, "The Matrix")])
    }

    async fn movie_detail(&self, movie_id: i64) -> AppResult<MovieDetail> {
        if movie_id == 404 {
            return Err(AppError::NotFound("TMDB resource not found".to_string()));
        }
        Ok(MovieDetail {
            id: movie_id,
            title: "The Matrix".to_string(),
            overview: String::new(),
            release_date: "1999-03-31".to_string(),
            poster_url: None,
            vote_average: 8.2,
            genres: vec![action()],
            cast: vec![CastMember {
                name: "Keanu Reeves".to_string(),
                character: "Neo".to_string(),
                profile_path: None,
            }],
            director: Some("Lana Wachowski".to_string()),
            writers: vec![],
            trailer_key: None,
        })
    }

    async fn popular_people(&self, _page: u32) -> AppResult<Vec<Person>> {
        Ok(vec![])
    }

    async fn discover_by_genre(&self, _genre_id: i64) -> AppResult<Vec<Movie>> {
        Ok(vec![movie(603, "The Matrix"), movie(155, "The Dark Knight")])
    }

    async fn discover(&self, _filter: &DiscoverFilter) -> AppResult<Vec<Movie>> {
        Ok(vec![movie(680, "Pulp Fiction")])
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        Ok(vec![action()])
    }
}

#[derive(Default)]
struct FakeFavorites {
    rows: Mutex<Vec<FavoriteEntry>>,
}

#[async_trait::async_trait]
impl FavoritesStore for FakeFavorites {
    async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<FavoriteEntry>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().filter(|f| f.user_id == user_id).cloned().collect())
    }

    async fn insert(&self, user_id: i64, favorite: &NewFavorite) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        if rows
            .iter()
            .any(|f| f.user_id == user_id && f.movie_id == favorite.movie_id)
        {
            return Ok(false);
        }
        rows.push(FavoriteEntry {
            user_id,
            movie_id: favorite.movie_id,
            title: favorite.title.clone(),
            poster_path: favorite.poster_path.clone(),
            added_at: Utc::now(),
        });
        Ok(true)
    }

    async fn remove(&self, user_id: i64, movie_id: i64) -> AppResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| !(f.user_id == user_id && f.movie_id == movie_id));
        Ok(rows.len() != before)
    }
}

#[derive(Default)]
struct FakeRatings {
    rows: Mutex<Vec<(i64, i64, RatingInput)>>,
}

#[async_trait::async_trait]
impl RatingsStore for FakeRatings {
    async fn upsert(&self, user_id: i64, movie_id: i64, rating: &RatingInput) -> AppResult<()> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|(u, m, _)| !(*u == user_id && *m == movie_id));
        rows.push((user_id, movie_id, rating.clone()));
        Ok(())
    }

    async fn list_for_movie(&self, movie_id: i64) -> AppResult<Vec<MovieRating>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .rev()
            .filter(|(_, m, _)| *m == movie_id)
            .enumerate()
            .map(|(i, (user_id, _, rating))| MovieRating {
                id: i as i64 + 1,
                score: rating.score,
                comment: rating.comment.clone(),
                created_at: Utc::now(),
                user_name: format!("user{}", user_id),
            })
            .collect())
    }
}

#[derive(Default)]
struct FakeUsers {
    rows: Mutex<Vec<(User, String)>>,
}

#[async_trait::async_trait]
impl UsersStore for FakeUsers {
    async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<Option<User>> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|(user, _)| user.email == email) {
            return Ok(None);
        }
        let user = User {
            id: rows.len() as i64 + 1,
            name: name.to_string(),
            email: email.to_string(),
            created_at: Utc::now(),
        };
        rows.push((user.clone(), password_hash.to_string()));
        Ok(Some(user))
    }
}

fn create_test_server() -> TestServer {
    let state = Arc::new(
        AppState::new(
            Arc::new(FakeCatalog),
            Arc::new(FakeFavorites::default()),
            Arc::new(FakeRatings::default()),
            Arc::new(FakeUsers::default()),
            Arc::new(InMemoryQuizHistory::new()),
            SECRET,
        )
        .with_bcrypt_cost(4),
    );
    let app = create_router(state, "http://localhost:5173");
    TestServer::new(app).unwrap()
}

fn bearer(user_id: i64) -> HeaderValue {
    let claims = Claims {
        sub: user_id,
        exp: (Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    HeaderValue::from_str(&format!("Bearer {}", token)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let id = "6f1c1c2e-2f7a-4a55-9e47-3d7c1a0d9b11";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.header("x-request-id"), id);
}

#[tokio::test]
async fn test_search_movies() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/search?q=matrix").await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies[0]["title"], "The Matrix");
}

#[tokio::test]
async fn test_search_blank_term_is_bad_request() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/search?q=%20").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_movie_detail_not_found() {
    let server = create_test_server();
    let response = server.get("/api/v1/movies/404").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_random_movie_and_genres() {
    let server = create_test_server();

    let response = server.get("/api/v1/movies/random?genre_id=80&year=1994").await;
    response.assert_status_ok();
    let movie: serde_json::Value = response.json();
    assert_eq!(movie["id"], 680);

    let response = server.get("/api/v1/genres").await;
    response.assert_status_ok();
    let genres: Vec<serde_json::Value> = response.json();
    assert_eq!(genres[0]["name"], "Action");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let server = create_test_server();

    server
        .get("/api/v1/favorites")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    server
        .get("/api/v1/quiz/question")
        .add_header(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_flow() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "Ana", "email": "Ana@Example.com", "password": "secret123" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user: serde_json::Value = response.json();
    assert_eq!(user["id"], 1);
    assert_eq!(user["email"], "ana@example.com");
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    // Same address in a different case
    server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "Ana", "email": "ana@example.com", "password": "secret123" }))
        .await
        .assert_status(StatusCode::CONFLICT);

    server
        .post("/api/v1/auth/register")
        .json(&json!({ "name": "Bo", "email": "not-an-email", "password": "secret123" }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorites_flow() {
    let server = create_test_server();

    let response = server
        .post("/api/v1/favorites")
        .add_header(AUTHORIZATION, bearer(1))
        .json(&json!({ "movie_id": 603, "title": "The Matrix" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    // Duplicate
    let response = server
        .post("/api/v1/favorites")
        .add_header(AUTHORIZATION, bearer(1))
        .json(&json!({ "movie_id": 603, "title": "The Matrix" }))
        .await;
    response.assert_status(StatusCode::CONFLICT);

    let response = server
        .get("/api/v1/favorites")
        .add_header(AUTHORIZATION, bearer(1))
        .await;
    response.assert_status_ok();
    let favorites: Vec<serde_json::Value> = response.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["movie_id"], 603);

    // Other users see their own list
    let response = server
        .get("/api/v1/favorites")
        .add_header(AUTHORIZATION, bearer(2))
        .await;
    let favorites: Vec<serde_json::Value> = response.json();
    assert!(favorites.is_empty());

    server
        .delete("/api/v1/favorites/603")
        .add_header(AUTHORIZATION, bearer(1))
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .delete("/api/v1/favorites/603")
        .add_header(AUTHORIZATION, bearer(1))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quiz_without_favorites_is_not_found() {
    let server = create_test_server();
    let response = server
        .get("/api/v1/quiz/question")
        .add_header(AUTHORIZATION, bearer(7))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quiz_question_has_four_options() {
    let server = create_test_server();
    server
        .post("/api/v1/favorites")
        .add_header(AUTHORIZATION, bearer(3))
        .json(&json!({ "movie_id": 603, "title": "The Matrix" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/v1/quiz/question")
        .add_header(AUTHORIZATION, bearer(3))
        .await;
    response.assert_status_ok();

    let question: serde_json::Value = response.json();
    let options = question["options"].as_array().unwrap();
    assert_eq!(options.len(), 4);
    let correct = question["correct_option_id"].as_u64().unwrap();
    assert!((1..=4).contains(&correct));
}

#[tokio::test]
async fn test_recommendations_exclude_favorites() {
    let server = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_header(AUTHORIZATION, bearer(4))
        .await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert!(movies.is_empty());

    server
        .post("/api/v1/favorites")
        .add_header(AUTHORIZATION, bearer(4))
        .json(&json!({ "movie_id": 603, "title": "The Matrix" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .get("/api/v1/recommendations")
        .add_header(AUTHORIZATION, bearer(4))
        .await;
    response.assert_status_ok();
    let movies: Vec<serde_json::Value> = response.json();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["id"], 155);
}

#[tokio::test]
async fn test_ratings_flow() {
    let server = create_test_server();

    server
        .post("/api/v1/movies/603/ratings")
        .add_header(AUTHORIZATION, bearer(1))
        .json(&json!({ "score": 9 }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .post("/api/v1/movies/603/ratings")
        .add_header(AUTHORIZATION, bearer(1))
        .json(&json!({ "score": 3 }))
        .await
        .assert_status(StatusCode::CREATED);

    // Resubmission replaces the earlier rating
    server
        .post("/api/v1/movies/603/ratings")
        .add_header(AUTHORIZATION, bearer(1))
        .json(&json!({ "score": 5, "comment": "Even better the second time" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.get("/api/v1/movies/603/ratings").await;
    response.assert_status_ok();
    let ratings: Vec<serde_json::Value> = response.json();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0]["score"], 5);
    assert_eq!(ratings[0]["user_name"], "user1");
}
