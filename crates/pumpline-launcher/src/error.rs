//! Launcher error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Token creation rejected: {0}")]
    Rejected(String),

    #[error("Missing field in creation response: {0}")]
    MissingField(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LaunchResult<T> = Result<T, LaunchError>;
