//! ALS model: fitting, evaluation and ranking.
//!
//! The factorization itself comes from `discorec`; this module only feeds it
//! joined rows and applies the cold-start "drop" rule around it.

use crate::error::{EngineError, Result};
use data_loader::{MovieId, RatedMovie, UserId};
use discorec::{Dataset, Recommender, RecommenderBuilder};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// Hyper-parameters handed to the ALS trainer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlsConfig {
    /// Latent factors per user and per movie
    pub factors: u32,
    pub iterations: u32,
    pub regularization: f32,
}

impl Default for AlsConfig {
    fn default() -> Self {
        Self {
            factors: 10,
            iterations: 10,
            regularization: 0.1,
        }
    }
}

/// Result of scoring the model against held-out rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// NaN when no test row survived the cold-start drop
    pub rmse: f32,
    /// Test rows actually scored
    pub evaluated: usize,
    /// Test rows dropped because their user or movie never appeared in training
    pub dropped: usize,
}

/// A trained recommender plus what it was trained with
pub struct TrainedModel {
    recommender: Recommender<UserId, MovieId>,
    config: AlsConfig,
    train_rows: usize,
}

fn to_dataset<'a>(rows: impl IntoIterator<Item = &'a RatedMovie>) -> Dataset<UserId, MovieId> {
    let mut dataset = Dataset::new();
    for row in rows {
        dataset.push(row.user_id, row.movie_id, row.rating);
    }
    dataset
}

impl TrainedModel {
    /// Fit explicit-feedback ALS on the training rows.
    #[instrument(skip(train), fields(rows = train.len()))]
    pub fn fit(train: &[RatedMovie], config: AlsConfig) -> Result<Self> {
        if train.is_empty() {
            return Err(EngineError::EmptyTrainingSet(
                "no ratings left after filtering and splitting".to_string(),
            ));
        }
        if config.factors == 0 || config.iterations == 0 {
            return Err(EngineError::InvalidConfig {
                field: "als".to_string(),
                reason: "factors and iterations must be positive".to_string(),
            });
        }

        let start = Instant::now();
        let dataset = to_dataset(train);
        let recommender = RecommenderBuilder::new()
            .factors(config.factors)
            .iterations(config.iterations)
            .regularization(config.regularization)
            .fit_explicit(&dataset);

        info!(
            "Fitted ALS on {} ratings ({} users, {} movies) in {:?}",
            train.len(),
            recommender.user_ids().len(),
            recommender.item_ids().len(),
            start.elapsed()
        );

        Ok(Self {
            recommender,
            config,
            train_rows: train.len(),
        })
    }

    pub fn config(&self) -> AlsConfig {
        self.config
    }

    /// Number of ratings the model was fitted on
    pub fn train_rows(&self) -> usize {
        self.train_rows
    }

    /// True when the user appeared in the training rows
    pub fn knows_user(&self, user_id: UserId) -> bool {
        self.recommender.user_factors(&user_id).is_some()
    }

    /// True when the movie appeared in the training rows
    pub fn knows_movie(&self, movie_id: MovieId) -> bool {
        self.recommender.item_factors(&movie_id).is_some()
    }

    /// Predicted rating, or `None` for a cold-start user or movie
    pub fn predict(&self, user_id: UserId, movie_id: MovieId) -> Option<f32> {
        (self.knows_user(user_id) && self.knows_movie(movie_id))
            .then(|| self.recommender.predict(&user_id, &movie_id))
    }

    /// RMSE over the test rows, dropping cold-start rows first.
    #[instrument(skip_all, fields(rows = test.len()))]
    pub fn evaluate(&self, test: &[RatedMovie]) -> Evaluation {
        let known: Vec<&RatedMovie> = test
            .iter()
            .filter(|row| self.knows_user(row.user_id) && self.knows_movie(row.movie_id))
            .collect();
        let dropped = test.len() - known.len();

        let rmse = if known.is_empty() {
            f32::NAN
        } else {
            self.recommender.rmse(&to_dataset(known.iter().copied()))
        };
        debug!("Evaluated {} rows, dropped {} cold-start rows", known.len(), dropped);

        Evaluation {
            rmse,
            evaluated: known.len(),
            dropped,
        }
    }

    /// Rank candidate movies for a user, best first.
    ///
    /// Candidates are deduplicated; cold-start movies are dropped. An unknown
    /// user gets an empty list.
    pub fn recommend(&self, user_id: UserId, candidates: &[MovieId], n: usize) -> Vec<(MovieId, f32)> {
        if !self.knows_user(user_id) {
            debug!("User {} not in training data, no predictions", user_id);
            return Vec::new();
        }

        let mut seen = HashSet::with_capacity(candidates.len());
        let mut scored: Vec<(MovieId, f32)> = candidates
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.predict(user_id, id).map(|score| (id, score)))
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));
        scored.truncate(n);
        scored
    }

    /// Every (user, factor vector) pair, sorted by user ID
    pub fn user_factors(&self) -> Vec<(UserId, Vec<f32>)> {
        let mut ids = self.recommender.user_ids().clone();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.recommender.user_factors(&id).map(|f| (id, f.to_vec())))
            .collect()
    }

    /// Every (movie, factor vector) pair, sorted by movie ID
    pub fn item_factors(&self) -> Vec<(MovieId, Vec<f32>)> {
        let mut ids = self.recommender.item_ids().clone();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.recommender.item_factors(&id).map(|f| (id, f.to_vec())))
            .collect()
    }
}
