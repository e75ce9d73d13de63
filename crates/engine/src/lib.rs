//! Training, evaluation, search and persistence for the ReelRecs demo.
//!
//! This crate contains the session orchestrator that coordinates the
//! filtering pipeline, the ALS model and the fuzzy title search.
//!
//! ## Example Usage
//! ```ignore
//! use engine::{Preferences, RecommenderSession, SessionConfig};
//!
//! let session = RecommenderSession::new(index.clone(), SessionConfig::default());
//! let report = session.run(&prefs)?;
//! println!("RMSE = {:.4}", report.evaluation.rmse);
//! engine::persist::save_model(&report.model, &report.evaluation, Path::new("movie_recommender_model"))?;
//! ```

pub mod error;
pub mod model;
pub mod persist;
pub mod search;
pub mod session;
pub mod split;

pub use error::{EngineError, Result};
pub use model::{AlsConfig, Evaluation, TrainedModel};
pub use persist::{load_artifact, save_model, ModelArtifact};
pub use search::{fuzzy_movie_search, top_matches, SearchMatch};
pub use session::{Outcome, Preferences, Recommendation, RecommenderSession, SessionConfig, SessionReport};
