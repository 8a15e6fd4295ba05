//! State persistence for the desk dashboard.
//!
//! Single JSON document, single-writer-at-a-time. Provides the two load
//! contracts (tolerant for sync, strict for mutation commands) and the
//! timestamp-stamping save.

pub mod error;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::StateStore;
