//! Filter implementations for the rating pipeline.

pub mod genre_preference;
pub mod minimum_rating;

pub use genre_preference::GenrePreferenceFilter;
pub use minimum_rating::MinimumRatingFilter;
