mod favorite;
mod movie;
mod quiz;
mod rating;
pub mod tmdb;
mod user;

pub use favorite::{FavoriteEntry, NewFavorite};
pub use movie::{CastMember, DiscoverFilter, Genre, Movie, MovieDetail, Person};
pub use quiz::{QuizOption, QuizQuestion, OPTION_COUNT};
pub use rating::{MovieRating, RatingInput};
pub use user::{Registration, User};
