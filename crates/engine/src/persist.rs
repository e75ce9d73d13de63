//! Saving the trained model to disk.
//!
//! Layout of the model directory:
//! - `metadata.json`: hyper-parameters, evaluation, sizes, creation time
//! - `factors.json`: user and movie factor vectors
//!
//! Saving always replaces whatever the directory held before.

use crate::error::{EngineError, Result};
use crate::model::{AlsConfig, Evaluation, TrainedModel};
use chrono::{DateTime, Utc};
use data_loader::{MovieId, UserId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const METADATA_FILE: &str = "metadata.json";
pub const FACTORS_FILE: &str = "factors.json";

/// Descriptive half of the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub config: AlsConfig,
    /// `None` when the evaluation set was empty
    pub rmse: Option<f32>,
    pub train_rows: usize,
    pub users: usize,
    pub movies: usize,
    pub created_at: DateTime<Utc>,
}

/// One entity's latent vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRow<Id> {
    pub id: Id,
    pub factors: Vec<f32>,
}

/// Numeric half of the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelFactors {
    pub users: Vec<FactorRow<UserId>>,
    pub movies: Vec<FactorRow<MovieId>>,
}

/// Everything written to the model directory
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub metadata: ModelMetadata,
    pub factors: ModelFactors,
}

impl ModelArtifact {
    /// Snapshot a trained model and its evaluation
    pub fn from_model(model: &TrainedModel, evaluation: &Evaluation) -> Self {
        let to_rows = |pairs: Vec<(u32, Vec<f32>)>| {
            pairs
                .into_iter()
                .map(|(id, factors)| FactorRow { id, factors })
                .collect::<Vec<_>>()
        };
        let factors = ModelFactors {
            users: to_rows(model.user_factors()),
            movies: to_rows(model.item_factors()),
        };

        Self {
            metadata: ModelMetadata {
                config: model.config(),
                rmse: evaluation.rmse.is_finite().then_some(evaluation.rmse),
                train_rows: model.train_rows(),
                users: factors.users.len(),
                movies: factors.movies.len(),
                created_at: Utc::now(),
            },
            factors,
        }
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> EngineError + '_ {
    move |source| EngineError::ModelIo {
        path: path.display().to_string(),
        source,
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(io_err(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush().map_err(io_err(path))?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(io_err(path))?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write the model to `dir`, overwriting any previous copy.
pub fn save_model(model: &TrainedModel, evaluation: &Evaluation, dir: &Path) -> Result<ModelArtifact> {
    let artifact = ModelArtifact::from_model(model, evaluation);

    if dir.exists() {
        fs::remove_dir_all(dir).map_err(io_err(dir))?;
    }
    fs::create_dir_all(dir).map_err(io_err(dir))?;

    write_json(&dir.join(METADATA_FILE), &artifact.metadata)?;
    write_json(&dir.join(FACTORS_FILE), &artifact.factors)?;

    info!(
        "Saved model ({} users, {} movies) to {}",
        artifact.metadata.users,
        artifact.metadata.movies,
        dir.display()
    );
    Ok(artifact)
}

/// Read a model directory written by [`save_model`]
pub fn load_artifact(dir: &Path) -> Result<ModelArtifact> {
    Ok(ModelArtifact {
        metadata: read_json(&dir.join(METADATA_FILE))?,
        factors: read_json(&dir.join(FACTORS_FILE))?,
    })
}
