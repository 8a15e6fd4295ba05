//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid state document: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
