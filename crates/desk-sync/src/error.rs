//! Sync error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("store error: {0}")]
    Store(#[from] desk_store::StoreError),

    #[error("source error: {0}")]
    Source(#[from] desk_sources::SourceError),
}

pub type SyncResult<T> = Result<T, SyncError>;
