use crate::Features::error::FeatureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("reaction {0} is not in the dataset")]
    UnknownReaction(usize),
    #[error("species with SID {0} is not in the dataset")]
    UnknownSpecies(usize),
    #[error(transparent)]
    Feature(#[from] FeatureError),
}
