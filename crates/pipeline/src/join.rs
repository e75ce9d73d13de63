//! Joining ratings to movies and applying the user's filters.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::genre_preference::movie_matches;
use crate::filters::{GenrePreferenceFilter, MinimumRatingFilter};
use anyhow::Result;
use data_loader::{DataIndex, Genre, Movie, MovieId, RatedMovie};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, instrument};

/// Output of [`filter_by_genre_and_rating`]
#[derive(Debug, Clone, Default)]
pub struct FilteredRatings {
    /// Joined rows surviving every filter, in ratings-file order
    pub rows: Vec<RatedMovie>,
    /// Movies surviving the genre filter, in movies-file order
    pub movies: Vec<Movie>,
}

impl FilteredRatings {
    /// Distinct movie IDs among the rows, in first-seen order
    pub fn distinct_movie_ids(&self) -> Vec<MovieId> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .map(|row| row.movie_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Inner join of ratings to the movies accepted by `movie_filter`.
///
/// Each rating matches at most one movie (IDs are unique in the index), so
/// the output never has more rows than the input. Ratings whose movie is
/// unknown or rejected are skipped before a joined row is built.
pub fn join_ratings<F>(index: &DataIndex, movie_filter: F) -> Vec<RatedMovie>
where
    F: Fn(&Movie) -> bool + Sync,
{
    index
        .ratings()
        .par_iter()
        .filter_map(|rating| {
            index
                .get_movie(rating.movie_id)
                .filter(|movie| movie_filter(*movie))
                .map(|movie| RatedMovie::join(rating, movie))
        })
        .collect()
}

/// Restrict movies by genre, join ratings to them, then apply the rating
/// threshold (`None` disables it).
#[instrument(skip(index))]
pub fn filter_by_genre_and_rating(
    index: &DataIndex,
    genres: &[Genre],
    min_rating: Option<f32>,
) -> Result<FilteredRatings> {
    let movies: Vec<Movie> = index
        .movies()
        .filter(|movie| movie_matches(movie, genres))
        .cloned()
        .collect();

    let kept: HashSet<MovieId> = movies.iter().map(|movie| movie.id).collect();
    let joined = join_ratings(index, |movie| kept.contains(&movie.id));
    debug!("Joined {} ratings to {} movies", joined.len(), kept.len());

    let mut pipeline = FilterPipeline::new().add_filter(GenrePreferenceFilter::new(genres.to_vec()));
    if let Some(threshold) = min_rating {
        pipeline = pipeline.add_filter(MinimumRatingFilter::new(threshold));
    }
    let rows = pipeline.apply(joined)?;

    debug!(
        "{} movies match the genre filter, {} rows remain",
        movies.len(),
        rows.len()
    );
    Ok(FilteredRatings { rows, movies })
}
