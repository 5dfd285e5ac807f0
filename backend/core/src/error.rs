use thiserror::Error;

/// Top-level error type for the FIRLens backend.
#[derive(Debug, Error)]
pub enum FirlensError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("extraction agent '{0}' not found")]
    AgentUnavailable(String),

    #[error("no data could be extracted from the file")]
    EmptyResult,

    #[error("malformed agent response: {0}")]
    MalformedResponse(String),

    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FirlensError {
    /// Whether this error was caused by the caller's request rather than the
    /// backend or the remote agent.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, FirlensError::InvalidRequest(_))
    }
}
