use serde::{Deserialize, Serialize};

/// A movie as returned by search and discover listings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub overview: String,
    /// ISO date (`YYYY-MM-DD`), empty when the provider has none
    pub release_date: String,
    pub poster_url: Option<String>,
    pub vote_average: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Full movie record assembled from the basic info, credits and videos endpoints.
///
/// Never persisted; fetched again whenever it is needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub release_date: String,
    pub poster_url: Option<String>,
    pub vote_average: f64,
    pub genres: Vec<Genre>,
    /// Top-billed cast in provider order, at most [`MovieDetail::MAX_CAST`] entries
    pub cast: Vec<CastMember>,
    pub director: Option<String>,
    pub writers: Vec<String>,
    pub trailer_key: Option<String>,
}

impl MovieDetail {
    pub const MAX_CAST: usize = 10;

    /// Year taken from the first four characters of the release date
    pub fn release_year(&self) -> Option<i32> {
        self.release_date.get(..4).and_then(|y| y.parse().ok())
    }
}

/// A person from the provider's popularity listing, used as quiz distractor material
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    pub name: String,
    #[serde(rename = "known_for_department", default)]
    pub department: String,
    #[serde(default)]
    pub popularity: f64,
}

/// Filters for a single discover page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverFilter {
    pub genre_id: Option<i64>,
    pub year: Option<i32>,
    pub page: u32,
}
