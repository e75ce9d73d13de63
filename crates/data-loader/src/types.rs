//! Core domain types for the ratings/movies dataset.
//!
//! Two flat tables come off disk: ratings and movies. The joined row type
//! (`RatedMovie`) is what the filtering pipeline and the trainer consume.

use crate::error::DataLoadError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user
pub type UserId = u32;

/// Unique identifier for a movie
pub type MovieId = u32;

// =============================================================================
// Genre
// =============================================================================

/// The genres a user may pick from at the prompt.
///
/// The dataset itself carries more genres than these (IMAX, Film-Noir, ...);
/// those stay as plain strings on `Movie::genres` and are simply never
/// selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Comedy,
    Drama,
    SciFi,
    Romance,
    Thriller,
    Horror,
    Adventure,
}

impl Genre {
    /// Whitelist, in the order it is shown to the user
    pub const ALL: [Genre; 8] = [
        Genre::Action,
        Genre::Comedy,
        Genre::Drama,
        Genre::SciFi,
        Genre::Romance,
        Genre::Thriller,
        Genre::Horror,
        Genre::Adventure,
    ];

    /// Label as it appears in the dataset's genre column
    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::SciFi => "Sci-Fi",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Horror => "Horror",
            Genre::Adventure => "Adventure",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = DataLoadError;

    /// Exact, case-sensitive match against the whitelist labels.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label() == s)
            .ok_or_else(|| DataLoadError::InvalidValue {
                field: "genre".to_string(),
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Movie
// =============================================================================

/// Represents a movie in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// Year extracted from title (e.g., "Toy Story (1995)")
    pub year: Option<u16>,
    /// Genre tokens as written in the dataset, e.g. `["Adventure", "Children"]`
    pub genres: Vec<String>,
}

impl Movie {
    /// Whole-token genre check. "Drama" does not match a "Docudrama" token.
    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.iter().any(|token| token == genre.label())
    }

    /// Genres joined back the way the dataset writes them
    pub fn genres_display(&self) -> String {
        self.genres.join("|")
    }
}

// =============================================================================
// Rating
// =============================================================================

/// Represents a single rating from a user for a movie
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
    /// Unix timestamp (seconds) when the rating was made
    pub timestamp: i64,
}

/// One row of the ratings ⋈ movies join
#[derive(Debug, Clone, PartialEq)]
pub struct RatedMovie {
    pub user_id: UserId,
    pub movie_id: MovieId,
    pub rating: f32,
    pub timestamp: i64,
    pub title: String,
    pub genres: Vec<String>,
}

impl RatedMovie {
    /// Build a joined row from a rating and its movie
    pub fn join(rating: &Rating, movie: &Movie) -> Self {
        Self {
            user_id: rating.user_id,
            movie_id: rating.movie_id,
            rating: rating.rating,
            timestamp: rating.timestamp,
            title: movie.title.clone(),
            genres: movie.genres.clone(),
        }
    }
}

// =============================================================================
// DataIndex - The In-Memory Tables
// =============================================================================

/// Holds both tables after loading.
///
/// Movies are looked up by ID through a HashMap; their file order is kept
/// separately so previews and searches read the same way every run.
#[derive(Debug)]
pub struct DataIndex {
    pub(crate) movies: HashMap<MovieId, Movie>,
    /// Movie IDs in the order they were inserted
    pub(crate) movie_order: Vec<MovieId>,
    pub(crate) ratings: Vec<Rating>,
    /// Number of rating rows discarded for having empty cells
    pub(crate) dropped_ratings: usize,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self {
            movies: HashMap::new(),
            movie_order: Vec::new(),
            ratings: Vec::new(),
            dropped_ratings: 0,
        }
    }

    /// Get a movie by ID
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All ratings, in file order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// All movies, in file order
    pub fn movies(&self) -> impl Iterator<Item = &Movie> {
        self.movie_order.iter().filter_map(|id| self.movies.get(id))
    }

    /// The first `n` movies, for the preview table
    pub fn preview(&self, n: usize) -> Vec<&Movie> {
        self.movies().take(n).collect()
    }

    /// Rating rows that were dropped at load time for missing values
    pub fn dropped_ratings(&self) -> usize {
        self.dropped_ratings
    }

    /// Insert a movie into the index.
    ///
    /// Re-inserting an existing ID replaces the movie but keeps its position.
    pub fn insert_movie(&mut self, movie: Movie) {
        if !self.movies.contains_key(&movie.id) {
            self.movie_order.push(movie.id);
        }
        self.movies.insert(movie.id, movie);
    }

    /// Insert a rating
    pub fn insert_rating(&mut self, rating: Rating) {
        self.ratings.push(rating);
    }

    /// Get counts for debugging/validation: (movies, ratings)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }
}

impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}
