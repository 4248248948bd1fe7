//! Error types for invitation lookup and data loading.

use thiserror::Error;

/// Why a detail route could not be turned into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("invitation id missing from route")]
    MissingId,

    #[error("invitation not found: {0}")]
    UnknownId(String),
}

/// Failures while building an invitation store from a data file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to parse invitation data: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate invitation id: {0}")]
    DuplicateId(String),

    #[error("invitation #{0} has an empty id")]
    EmptyId(usize),
}
