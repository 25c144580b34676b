//! Error type for the recommendation engine

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("unknown component category '{0}'")]
    UnknownCategory(String),

    #[error("invalid tier policy: {0}")]
    InvalidPolicy(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
