//! Pipeline for turning raw tables into the rows the model trains on.
//!
//! This crate provides:
//! - Genre selection from free-text input against the whitelist
//! - Filter trait and implementations for joined rating rows
//! - FilterPipeline for composing filters
//! - The ratings ⋈ movies join
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{filter_by_genre_and_rating, select_genres};
//!
//! let genres = select_genres("Action, Sci-Fi");
//! let filtered = filter_by_genre_and_rating(&index, &genres, Some(3.5))?;
//! println!("{} rows over {} movies", filtered.rows.len(), filtered.movies.len());
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod genres;
pub mod join;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use genres::select_genres;
pub use join::{filter_by_genre_and_rating, join_ratings, FilteredRatings};
