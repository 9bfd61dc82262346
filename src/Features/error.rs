use super::vectorizer::SpeciesIdentity;
use thiserror::Error;

/// error types of bond extraction and feature vector construction
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FeatureError {
    #[error("malformed molecular record: {0}")]
    MalformedRecord(String),
    #[error("feature vector of the reaction is undefined: {0} has no feature vector")]
    Undefined(SpeciesIdentity),
    #[error("atomic number {0} is not present in the element table")]
    UnknownElement(u32),
    #[error("bond catalog error: {0}")]
    Catalog(String),
    #[error("feature vector has length {found}, bond catalog has {expected} entries")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("failed to parse PubChem record: {0}")]
    Parse(String),
    #[error("failed to load reference data: {0}")]
    Load(String),
}

impl FeatureError {
    pub fn malformed(details: impl Into<String>) -> Self {
        FeatureError::MalformedRecord(details.into())
    }
}
