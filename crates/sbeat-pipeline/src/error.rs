//! Pipeline error types.

use thiserror::Error;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A post-run invariant gate failed. Fatal to the run.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid mutation card '{0}': {1}")]
    InvalidCard(String, validator::ValidationErrors),

    #[error("Analysis error: {0}")]
    Analysis(#[from] sbeat_analysis::AnalysisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Check if this is a validation-gate failure (as opposed to an input
    /// or analysis error).
    pub fn is_validation(&self) -> bool {
        matches!(self, PipelineError::Validation(_) | PipelineError::InvalidCard(_, _))
    }
}
