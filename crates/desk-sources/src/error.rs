//! Source adapter error types.
//!
//! These never cross the adapter boundary: every public fetch converts a
//! failure into an absent result and logs it.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out after {0}s")]
    Timeout(u64),

    #[error("scraper process failed: {0}")]
    Process(String),
}

pub type SourceResult<T> = Result<T, SourceError>;
