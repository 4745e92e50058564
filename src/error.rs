//! Error types for nudge.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NudgeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    /// The external candidate source failed to answer a category query.
    #[error("candidate source error: {0}")]
    CandidateSource(String),

    #[error("suggestion not found: {0}")]
    SuggestionNotFound(String),
}

impl From<serde_json::Error> for NudgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, NudgeError>;
