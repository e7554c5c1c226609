use rand::{seq::SliceRandom, Rng};

use crate::{models::Person, services::catalog::CatalogClient};

use super::strategies::DISTRACTOR_COUNT;

/// Source of wrong-answer names for person questions.
///
/// Candidates come from a random page of the catalog's popular-people listing; when the
/// page cannot be fetched or yields too few names, a fixed list of well-known names is
/// used instead. Fetch failures are never retried.
#[derive(Debug, Clone, Copy)]
pub struct PeoplePool {
    pub department: &'static str,
    /// People above this popularity qualify regardless of department
    pub min_popularity: f64,
    /// Maximum number of candidates kept from one page
    pub cap: usize,
    /// Page is chosen uniformly from `1..=pages`
    pub pages: u32,
    pub fallback: &'static [&'static str],
}

pub const DIRECTORS: PeoplePool = PeoplePool {
    department: "Directing",
    min_popularity: 10.0,
    cap: 10,
    pages: 5,
    fallback: &[
        "Christopher Nolan",
        "Steven Spielberg",
        "Martin Scorsese",
        "Quentin Tarantino",
        "James Cameron",
        "Ridley Scott",
        "David Fincher",
        "Tim Burton",
        "Denis Villeneuve",
        "Jordan Peele",
        "Greta Gerwig",
        "Damien Chazelle",
    ],
};

pub const ACTORS: PeoplePool = PeoplePool {
    department: "Acting",
    min_popularity: 15.0,
    cap: 15,
    pages: 10,
    fallback: &[
        "Leonardo DiCaprio",
        "Brad Pitt",
        "Tom Hanks",
        "Will Smith",
        "Robert Downey Jr.",
        "Scarlett Johansson",
        "Jennifer Lawrence",
        "Emma Stone",
        "Ryan Gosling",
        "Margot Robbie",
        "Timothée Chalamet",
        "Zendaya",
        "Chris Evans",
        "Gal Gadot",
        "Ryan Reynolds",
        "Sandra Bullock",
    ],
};

impl PeoplePool {
    /// Up to three shuffled names, none of them in `exclude`.
    ///
    /// May return fewer than three only if even the fallback list is exhausted.
    pub async fn pick<R: Rng + Send + ?Sized>(
        &self,
        catalog: &dyn CatalogClient,
        exclude: &[&str],
        rng: &mut R,
    ) -> Vec<String> {
        let page = rng.gen_range(1..=self.pages);

        let mut candidates = match catalog.popular_people(page).await {
            Ok(people) => self.eligible(people, exclude),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    department = self.department,
                    page = page,
                    "Popular people fetch failed, using fallback names"
                );
                Vec::new()
            }
        };

        if candidates.len() < DISTRACTOR_COUNT {
            tracing::debug!(
                department = self.department,
                found = candidates.len(),
                "Too few popular people, using fallback names"
            );
            candidates = self.fallback_names(exclude);
        }

        candidates.shuffle(rng);
        candidates.truncate(DISTRACTOR_COUNT);
        candidates
    }

    /// Names from a listing page that match the department or popularity threshold
    fn eligible(&self, people: Vec<Person>, exclude: &[&str]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for person in people {
            if names.len() == self.cap {
                break;
            }
            let qualifies =
                person.department == self.department || person.popularity > self.min_popularity;
            if qualifies && !exclude.contains(&person.name.as_str()) && !names.contains(&person.name)
            {
                names.push(person.name);
            }
        }
        names
    }

    fn fallback_names(&self, exclude: &[&str]) -> Vec<String> {
        self.fallback
            .iter()
            .filter(|name| !exclude.contains(*name))
            .map(|name| name.to_string())
            .collect()
    }
}
