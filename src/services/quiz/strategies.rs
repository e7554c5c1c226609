//! Question strategies.
//!
//! Each strategy is a plain function of a [`MovieDetail`], any distractor material it
//! needs, and a random source. Strategies that cannot produce a question return `None`
//! and the caller falls back to [`release_year_question`], which only needs a release date.

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, QuizOption, QuizQuestion, OPTION_COUNT},
};

/// Wrong answers per question
pub const DISTRACTOR_COUNT: usize = OPTION_COUNT - 1;

/// Valid range for release-year distractors
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2025;

/// Maximum distance of a year distractor from the correct year
const YEAR_SPREAD: i32 = 10;

/// Cast answers are drawn from the top-billed members only
const TOP_BILLED: usize = 3;

pub const GENRE_NAMES: [&str; 18] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Romance",
    "Science Fiction",
    "Adventure",
    "Thriller",
    "Animation",
    "Documentary",
    "Fantasy",
    "Crime",
    "Mystery",
    "Family",
    "War",
    "History",
    "Music",
    "Western",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    ReleaseYear,
    Director,
    Cast,
    Genre,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 4] = [
        QuestionKind::ReleaseYear,
        QuestionKind::Director,
        QuestionKind::Cast,
        QuestionKind::Genre,
    ];

    /// Uniform choice among the four kinds
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// "In what year was X released?"
///
/// Fails with [`AppError::MissingReleaseDate`] when the movie has no usable date.
pub fn release_year_question<R: Rng + ?Sized>(
    detail: &MovieDetail,
    rng: &mut R,
) -> AppResult<QuizQuestion> {
    let year = detail
        .release_year()
        .ok_or(AppError::MissingReleaseDate(detail.id))?;

    let distractors = distractor_years(year, rng)
        .into_iter()
        .map(|y| y.to_string())
        .collect();

    Ok(assemble(
        format!("In what year was '{}' released?", detail.title),
        year.to_string(),
        distractors,
        rng,
    ))
}

/// Three distinct years near `correct`, all within [`MIN_YEAR`, `MAX_YEAR`]
pub fn distractor_years<R: Rng + ?Sized>(correct: i32, rng: &mut R) -> Vec<i32> {
    let mut years = Vec::with_capacity(DISTRACTOR_COUNT);

    while years.len() < DISTRACTOR_COUNT {
        let mut candidate = correct + rng.gen_range(-YEAR_SPREAD..=YEAR_SPREAD);

        if candidate < MIN_YEAR {
            candidate = rng.gen_range(1900..=1919);
        } else if candidate > MAX_YEAR {
            candidate = rng.gen_range(2005..=2024);
        }

        if candidate != correct && !years.contains(&candidate) {
            years.push(candidate);
        }
    }

    years
}

/// Known director name, if any
pub fn director_of(detail: &MovieDetail) -> Option<&str> {
    detail
        .director
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
}

/// "Who directed X?"
pub fn director_question<R: Rng + ?Sized>(
    detail: &MovieDetail,
    distractors: &[String],
    rng: &mut R,
) -> Option<QuizQuestion> {
    let director = director_of(detail)?;
    let distractors = take_distractors(distractors, &[director])?;

    Some(assemble(
        format!("Who directed '{}'?", detail.title),
        director.to_string(),
        distractors,
        rng,
    ))
}

/// Uniform pick among the top-billed cast members
pub fn cast_answer<'a, R: Rng + ?Sized>(detail: &'a MovieDetail, rng: &mut R) -> Option<&'a str> {
    let top = &detail.cast[..detail.cast.len().min(TOP_BILLED)];
    top.choose(rng).map(|member| member.name.as_str())
}

/// "Which of these actors appeared in X?"
///
/// `distractors` must not contain anyone from the movie's cast.
pub fn cast_question<R: Rng + ?Sized>(
    detail: &MovieDetail,
    answer: &str,
    distractors: &[String],
    rng: &mut R,
) -> Option<QuizQuestion> {
    let cast: Vec<&str> = detail.cast.iter().map(|m| m.name.as_str()).collect();
    let distractors = take_distractors(distractors, &cast)?;

    Some(assemble(
        format!("Which of these actors appeared in '{}'?", detail.title),
        answer.to_string(),
        distractors,
        rng,
    ))
}

/// "Which of these is a genre of X?"
///
/// Distractors come from [`GENRE_NAMES`], minus every genre the movie has.
pub fn genre_question<R: Rng + ?Sized>(
    detail: &MovieDetail,
    rng: &mut R,
) -> Option<QuizQuestion> {
    let answer = detail.genres.choose(rng)?.name.clone();

    let mut pool: Vec<&str> = GENRE_NAMES
        .iter()
        .copied()
        .filter(|name| !detail.genres.iter().any(|g| g.name.eq_ignore_ascii_case(name)))
        .collect();

    if pool.len() < DISTRACTOR_COUNT {
        return None;
    }

    pool.shuffle(rng);
    let distractors = pool
        .into_iter()
        .take(DISTRACTOR_COUNT)
        .map(str::to_string)
        .collect();

    Some(assemble(
        format!("Which of these is a genre of '{}'?", detail.title),
        answer,
        distractors,
        rng,
    ))
}

/// First [`DISTRACTOR_COUNT`] distinct names not in `exclude`, or `None` if too few
fn take_distractors(candidates: &[String], exclude: &[&str]) -> Option<Vec<String>> {
    let mut picked: Vec<String> = Vec::with_capacity(DISTRACTOR_COUNT);
    for name in candidates {
        if picked.len() == DISTRACTOR_COUNT {
            break;
        }
        if !exclude.contains(&name.as_str()) && !picked.contains(name) {
            picked.push(name.clone());
        }
    }

    (picked.len() == DISTRACTOR_COUNT).then_some(picked)
}

/// Shuffle the correct answer in with its distractors and number the options 1..=4
fn assemble<R: Rng + ?Sized>(
    prompt: String,
    answer: String,
    distractors: Vec<String>,
    rng: &mut R,
) -> QuizQuestion {
    let mut entries: Vec<(bool, String)> = Vec::with_capacity(OPTION_COUNT);
    entries.push((true, answer));
    entries.extend(distractors.into_iter().map(|text| (false, text)));
    entries.shuffle(rng);

    let mut correct_option_id = 0;
    let options: Vec<QuizOption> = entries
        .into_iter()
        .zip(1u8..)
        .map(|((is_answer, text), id)| {
            if is_answer {
                correct_option_id = id;
            }
            QuizOption { id, text }
        })
        .collect();

    QuizQuestion {
        prompt,
        options,
        correct_option_id,
    }
}
