//! Filter to enforce the user's minimum rating threshold.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::RatedMovie;

/// Removes rows rated below the threshold.
///
/// A row rated exactly at the threshold is kept.
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Lowest rating value to keep (1.0 to 5.0 from the prompt)
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply(&self, rows: Vec<RatedMovie>) -> Result<Vec<RatedMovie>> {
        Ok(rows
            .into_iter()
            .filter(|row| row.rating >= self.min_rating)
            .collect())
    }
}
