//! State synchronization for the desk dashboard.
//!
//! The merge engine computes the next document from the previous one plus
//! whatever the source adapters produced; the orchestrator fans the
//! fetches out, merges once, and saves once.

pub mod error;
pub mod merge;
pub mod orchestrator;

pub use error::{SyncError, SyncResult};
pub use merge::{merge, FetchedSources, MOVER_COUNT};
pub use orchestrator::{run_sync, SyncReport, SyncSources};
