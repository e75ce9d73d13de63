//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable filters to be
//! applied to joined rating rows.

use anyhow::Result;
use data_loader::RatedMovie;

/// Core trait for filtering joined rating rows.
///
/// Filters take ownership of the rows and return the ones they keep, in the
/// same relative order.
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of rows.
    fn apply(&self, rows: Vec<RatedMovie>) -> Result<Vec<RatedMovie>>;
}
