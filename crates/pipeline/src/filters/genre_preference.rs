//! Filter to keep only movies matching the user's preferred genres.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::{Genre, Movie, RatedMovie};

/// True when any genre token equals one of the preferred genre labels.
///
/// An empty preference list matches everything.
pub fn matches_genres(tokens: &[String], preferred: &[Genre]) -> bool {
    preferred.is_empty()
        || tokens
            .iter()
            .any(|token| preferred.iter().any(|genre| token == genre.label()))
}

/// Movie-level form of [`matches_genres`]
pub fn movie_matches(movie: &Movie, preferred: &[Genre]) -> bool {
    matches_genres(&movie.genres, preferred)
}

/// Keeps only rows whose movie carries at least one preferred genre.
///
/// ## Algorithm
/// 1. For each row, compare every genre token against the preferred labels
/// 2. Keep rows with at least one exact token match
pub struct GenrePreferenceFilter {
    preferred: Vec<Genre>,
}

impl GenrePreferenceFilter {
    /// Create a new GenrePreferenceFilter.
    ///
    /// # Arguments
    /// * `preferred` - Genres picked at the prompt; empty means "no preference"
    pub fn new(preferred: Vec<Genre>) -> Self {
        Self { preferred }
    }
}

impl Filter for GenrePreferenceFilter {
    fn name(&self) -> &str {
        "GenrePreferenceFilter"
    }

    fn apply(&self, rows: Vec<RatedMovie>) -> Result<Vec<RatedMovie>> {
        if self.preferred.is_empty() {
            return Ok(rows);
        }
        Ok(rows
            .into_iter()
            .filter(|row| matches_genres(&row.genres, &self.preferred))
            .collect())
    }
}
