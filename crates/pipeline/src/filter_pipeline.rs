//! The FilterPipeline orchestrates multiple filters.
//!
//! Filters are chained with the builder pattern and run in insertion order.

use crate::traits::Filter;
use anyhow::Result;
use data_loader::RatedMovie;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(GenrePreferenceFilter::new(vec![Genre::Action]))
///     .add_filter(MinimumRatingFilter::new(3.5));
///
/// let filtered = pipeline.apply(rows)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// True when no filter has been added
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the rows.
    ///
    /// # Returns
    /// * `Ok(Vec<RatedMovie>)` - The rows kept by every filter
    /// * `Err` - If any filter fails
    pub fn apply(&self, rows: Vec<RatedMovie>) -> Result<Vec<RatedMovie>> {
        let mut current = rows;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
