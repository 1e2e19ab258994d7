//! Analysis error types.

use thiserror::Error;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Timestamp error: {0}")]
    Timestamp(#[from] sbeat_models::TimestampError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AnalysisError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
