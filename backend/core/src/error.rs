use thiserror::Error;

/// Top-level error type for the SnapSolve runtime.
#[derive(Debug, Error)]
pub enum SnapError {
    #[error("image ingress failed: {0}")]
    Ingress(String),

    #[error("inference provider error ({provider}): {message}")]
    Inference { provider: String, message: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
