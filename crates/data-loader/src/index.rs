//! DataIndex building and validation.
//!
//! Both files are parsed in parallel, then the tables are filled and checked.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, instrument, warn};

impl DataIndex {
    /// Load the ratings and movies files
    ///
    /// Steps:
    /// 1. Parse both files (in parallel)
    /// 2. Insert movies then ratings
    /// 3. Validate data integrity
    #[instrument(skip_all, fields(ratings = %ratings_path.display(), movies = %movies_path.display()))]
    pub fn load_from_files(ratings_path: &Path, movies_path: &Path) -> Result<Self> {
        let (ratings, movies) = rayon::join(
            || parser::parse_ratings(ratings_path),
            || parser::parse_movies(movies_path),
        );
        let ratings = ratings?;
        let movies = movies?;

        info!(
            "Parsed {} movies, {} ratings ({} rating rows dropped for missing values)",
            movies.len(),
            ratings.ratings.len(),
            ratings.dropped
        );

        let index = Self::from_parts(movies, ratings)?;
        info!("DataIndex successfully built and validated");
        Ok(index)
    }

    /// Build an index from already-parsed tables and validate it
    pub fn from_parts(movies: Vec<Movie>, ratings: parser::ParsedRatings) -> Result<Self> {
        let mut index = DataIndex::new();

        let mut seen = HashSet::with_capacity(movies.len());
        for movie in movies {
            if !seen.insert(movie.id) {
                return Err(DataLoadError::ValidationError(format!(
                    "duplicate movieId {}",
                    movie.id
                )));
            }
            index.insert_movie(movie);
        }

        for rating in ratings.ratings {
            index.insert_rating(rating);
        }
        index.dropped_ratings = ratings.dropped;

        index.validate()?;
        Ok(index)
    }

    /// Validate data integrity
    ///
    /// Check that every rating value is a finite number. Ratings pointing at
    /// unknown movies are allowed here; the join drops them later.
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self.ratings.iter().find(|r| !r.rating.is_finite()) {
            return Err(DataLoadError::InvalidValue {
                field: "rating".to_string(),
                value: bad.rating.to_string(),
            });
        }

        let orphans = self
            .ratings
            .iter()
            .filter(|r| !self.movies.contains_key(&r.movie_id))
            .count();
        if orphans > 0 {
            warn!("{} ratings reference movies missing from the movies file", orphans);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ParsedRatings;

    fn movie(id: MovieId) -> Movie {
        Movie {
            id,
            title: format!("Movie {id}"),
            year: None,
            genres: vec!["Drama".to_string()],
        }
    }

    #[test]
    fn test_duplicate_movie_rejected() {
        let err = DataIndex::from_parts(vec![movie(1), movie(1)], ParsedRatings::default()).unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError(_)));
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        let ratings = ParsedRatings {
            ratings: vec![Rating {
                user_id: 1,
                movie_id: 1,
                rating: f32::NAN,
                timestamp: 0,
            }],
            dropped: 0,
        };
        assert!(DataIndex::from_parts(vec![movie(1)], ratings).is_err());
    }

    #[test]
    fn test_from_parts_keeps_dropped_count() {
        let ratings = ParsedRatings {
            ratings: vec![Rating {
                user_id: 1,
                movie_id: 7,
                rating: 4.0,
                timestamp: 0,
            }],
            dropped: 3,
        };
        let index = DataIndex::from_parts(vec![movie(1)], ratings).unwrap();
        assert_eq!(index.counts(), (1, 1));
        assert_eq!(index.dropped_ratings(), 3);
    }
}
