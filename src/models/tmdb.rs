// ============================================================================
// TMDB API Types
// ============================================================================

use serde::Deserialize;

use super::{CastMember, Genre, Movie, MovieDetail, Person};

/// Generic paged listing (`/search/movie`, `/discover/movie`, `/person/popular`)
#[derive(Debug, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Movie as it appears in listings and in `/movie/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    /// Only present on `/movie/{id}`
    #[serde(default)]
    pub genres: Vec<Genre>,
}

impl TmdbMovie {
    /// Convert to a listing entry, expanding the poster path with `image_url`
    pub fn into_movie(self, image_url: &str) -> Movie {
        Movie {
            id: self.id,
            title: self.title,
            overview: self.overview.unwrap_or_default(),
            release_date: self.release_date.unwrap_or_default(),
            poster_url: poster_url(image_url, self.poster_path.as_deref()),
            vote_average: self.vote_average,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<TmdbCrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

#[derive(Debug, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

pub type TmdbPeoplePage = TmdbPage<Person>;

const WRITER_JOBS: [&str; 3] = ["Screenplay", "Writer", "Story"];

/// Merge the three detail sub-responses into a single [`MovieDetail`]
pub fn assemble_detail(
    basic: TmdbMovie,
    credits: TmdbCredits,
    videos: TmdbVideos,
    image_url: &str,
) -> MovieDetail {
    let director = credits
        .crew
        .iter()
        .find(|member| member.job == "Director")
        .map(|member| member.name.clone());

    let writers = credits
        .crew
        .iter()
        .filter(|member| WRITER_JOBS.contains(&member.job.as_str()))
        .map(|member| member.name.clone())
        .collect();

    let trailer_key = videos
        .results
        .into_iter()
        .find(|video| video.site == "YouTube" && video.video_type == "Trailer")
        .map(|video| video.key);

    let mut cast = credits.cast;
    cast.truncate(MovieDetail::MAX_CAST);

    MovieDetail {
        id: basic.id,
        title: basic.title,
        overview: basic.overview.unwrap_or_default(),
        release_date: basic.release_date.unwrap_or_default(),
        poster_url: poster_url(image_url, basic.poster_path.as_deref()),
        vote_average: basic.vote_average,
        genres: basic.genres,
        cast,
        director,
        writers,
        trailer_key,
    }
}

fn poster_url(image_url: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", image_url, p))
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_URL: &str = "https://image.tmdb.org/t/p/w500";

    fn basic() -> TmdbMovie {
        serde_json::from_str(
            r#"{
                "id": 27205,
                "title": "Inception",
                "overview": "A thief who steals corporate secrets",
                "release_date": "2010-07-15",
                "poster_path": "/inception.jpg",
                "vote_average": 8.4,
                "genres": [{"id": 28, "name": "Action"}, {"id": 878, "name": "Science Fiction"}]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_tmdb_movie_into_movie() {
        let movie = basic().into_movie(IMAGE_URL);
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(
            movie.poster_url,
            Some("https://image.tmdb.org/t/p/w500/inception.jpg".to_string())
        );
        assert_eq!(movie.release_date, "2010-07-15");
    }

    #[test]
    fn test_listing_with_nulls() {
        let json = r#"{"results": [{"id": 1, "title": "Untitled", "overview": null, "release_date": null, "poster_path": null}]}"#;
        let page: TmdbPage<TmdbMovie> = serde_json::from_str(json).unwrap();
        let movie = page.results.into_iter().next().unwrap().into_movie(IMAGE_URL);

        assert_eq!(movie.overview, "");
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.poster_url, None);
        assert_eq!(movie.vote_average, 0.0);
    }

    #[test]
    fn test_assemble_detail_extracts_crew_and_trailer() {
        let credits: TmdbCredits = serde_json::from_str(
            r#"{
                "cast": [
                    {"name": "Leonardo DiCaprio", "character": "Cobb"},
                    {"name": "Joseph Gordon-Levitt", "character": "Arthur"}
                ],
                "crew": [
                    {"name": "Hans Zimmer", "job": "Original Music Composer"},
                    {"name": "Christopher Nolan", "job": "Director"},
                    {"name": "Christopher Nolan", "job": "Screenplay"},
                    {"name": "Someone Else", "job": "Story"}
                ]
            }"#,
        )
        .unwrap();
        let videos: TmdbVideos = serde_json::from_str(
            r#"{"results": [
                {"key": "teaser1", "site": "YouTube", "type": "Teaser"},
                {"key": "vimeo1", "site": "Vimeo", "type": "Trailer"},
                {"key": "YoMZ", "site": "YouTube", "type": "Trailer"}
            ]}"#,
        )
        .unwrap();

        let detail = assemble_detail(basic(), credits, videos, IMAGE_URL);

        assert_eq!(detail.director.as_deref(), Some("Christopher Nolan"));
        assert_eq!(detail.writers, vec!["Christopher Nolan", "Someone Else"]);
        assert_eq!(detail.trailer_key.as_deref(), Some("YoMZ"));
        assert_eq!(detail.cast.len(), 2);
        assert_eq!(detail.genres.len(), 2);
    }

    #[test]
    fn test_assemble_detail_caps_cast() {
        let cast: Vec<String> = (0..15)
            .map(|i| format!(r#"{{"name": "Actor {}", "character": "Role {}"}}"#, i, i))
            .collect();
        let credits: TmdbCredits =
            serde_json::from_str(&format!(r#"{{"cast": [{}], "crew": []}}"#, cast.join(",")))
                .unwrap();
        let videos = TmdbVideos { results: vec![] };

        let detail = assemble_detail(basic(), credits, videos, IMAGE_URL);

        assert_eq!(detail.cast.len(), MovieDetail::MAX_CAST);
        assert_eq!(detail.cast[0].name, "Actor 0");
        assert_eq!(detail.director, None);
        assert_eq!(detail.trailer_key, None);
    }
}
