//! # Data Loader Crate
//!
//! Loads the ratings and movies CSV files into an in-memory `DataIndex`.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Rating, Movie, Genre, RatedMovie, DataIndex)
//! - **parser**: Parse the CSV files into Rust structs
//! - **index**: Build and validate the DataIndex
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(
//!     Path::new("data/rating.csv"),
//!     Path::new("data/movie.csv"),
//! )?;
//!
//! for movie in index.preview(5) {
//!     println!("{} [{}]", movie.title, movie.genres_display());
//! }
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{DataLoadError, Result};
pub use parser::ParsedRatings;
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    RatedMovie,
    DataIndex,
    // Enums
    Genre,
};
