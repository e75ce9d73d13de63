//! # Recommender Session
//!
//! Runs one pass of the demo for a set of user preferences:
//! 1. Filter movies by genre, join ratings, filter by rating
//! 2. Split the rows into train/test
//! 3. Fit ALS on train
//! 4. Evaluate RMSE on test
//! 5. Either fuzzy-search a title or rank movies for the user

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument, warn};

use data_loader::{DataIndex, Genre, MovieId, UserId};
use pipeline::filter_by_genre_and_rating;

use crate::error::Result;
use crate::model::{AlsConfig, Evaluation, TrainedModel};
use crate::search::{top_matches, SearchMatch};
use crate::split::{random_split, DEFAULT_TRAIN_FRACTION};

/// How many titles a search outcome carries
pub const SEARCH_RESULTS: usize = 5;

/// Answers collected at the prompt
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub user_id: UserId,
    /// How many recommendations to show
    pub count: usize,
    pub genres: Vec<Genre>,
    pub min_rating: Option<f32>,
    /// Set when the user asked for a title search instead of recommendations
    pub movie_name: Option<String>,
}

/// Knobs for one session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub als: AlsConfig,
    pub train_fraction: f64,
    /// Fixes the train/test split when set
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            als: AlsConfig::default(),
            train_fraction: DEFAULT_TRAIN_FRACTION,
            seed: None,
        }
    }
}

/// One ranked movie
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub movie_id: MovieId,
    pub title: String,
    pub predicted_rating: f32,
}

/// What the session produced for the user
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Closest titles for the free-text name, best first (empty if no movie
    /// survived filtering)
    Search {
        query: String,
        matches: Vec<SearchMatch>,
    },
    /// Top-N predictions, best first
    Recommendations(Vec<Recommendation>),
}

impl Outcome {
    /// Best search match, if this is a search outcome with any match
    pub fn best_match(&self) -> Option<&SearchMatch> {
        match self {
            Outcome::Search { matches, .. } => matches.first(),
            Outcome::Recommendations(_) => None,
        }
    }
}

/// Everything a finished session hands back
pub struct SessionReport {
    pub model: TrainedModel,
    pub evaluation: Evaluation,
    pub outcome: Outcome,
    /// Rows left after filtering, before the split
    pub filtered_rows: usize,
}

/// Coordinates filtering, training, evaluation and ranking
#[derive(Clone)]
pub struct RecommenderSession {
    data_index: Arc<DataIndex>,
    config: SessionConfig,
}

impl RecommenderSession {
    pub fn new(data_index: Arc<DataIndex>, config: SessionConfig) -> Self {
        Self { data_index, config }
    }

    /// Main entry point: run the whole flow for one set of preferences
    #[instrument(skip(self, prefs), fields(user_id = prefs.user_id))]
    pub fn run(&self, prefs: &Preferences) -> Result<SessionReport> {
        let start_time = Instant::now();

        let filtered = filter_by_genre_and_rating(&self.data_index, &prefs.genres, prefs.min_rating)?;
        let filtered_rows = filtered.rows.len();
        let candidates = filtered.distinct_movie_ids();
        info!(
            "Filtered to {} ratings over {} movies",
            filtered_rows,
            candidates.len()
        );

        let (train, test) = random_split(filtered.rows, self.config.train_fraction, self.config.seed)?;
        info!("Split into {} train / {} test rows", train.len(), test.len());

        let model = TrainedModel::fit(&train, self.config.als)?;
        let evaluation = model.evaluate(&test);
        info!("Model evaluation: RMSE = {:.4}", evaluation.rmse);

        let outcome = match &prefs.movie_name {
            Some(query) => Outcome::Search {
                query: query.clone(),
                matches: top_matches(query, &filtered.movies, SEARCH_RESULTS),
            },
            None => {
                if !model.knows_user(prefs.user_id) {
                    warn!(
                        "User {} has no ratings in the training split; nothing to recommend",
                        prefs.user_id
                    );
                }
                let ranked = model.recommend(prefs.user_id, &candidates, prefs.count);
                Outcome::Recommendations(self.attach_titles(ranked))
            }
        };

        info!("Session finished in {:?}", start_time.elapsed());
        Ok(SessionReport {
            model,
            evaluation,
            outcome,
            filtered_rows,
        })
    }

    /// Join ranked movie IDs back to their titles, keeping rank order
    fn attach_titles(&self, ranked: Vec<(MovieId, f32)>) -> Vec<Recommendation> {
        ranked
            .into_iter()
            .filter_map(|(movie_id, predicted_rating)| {
                self.data_index.get_movie(movie_id).map(|movie| Recommendation {
                    movie_id,
                    title: movie.title.clone(),
                    predicted_rating,
                })
            })
            .collect()
    }
}
