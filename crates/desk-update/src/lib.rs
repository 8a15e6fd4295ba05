//! Targeted partial updates for the desk dashboard state.
//!
//! Each update struct is one command's worth of independent flags, scoped
//! to exactly one bot's subtree (or the daily brief). Flags compose: every
//! set field is applied in a fixed order against the same loaded state, so
//! one invocation needs only one load/save round trip. Derived count
//! fields are recomputed from their collections, never incremented
//! independently.

pub mod common;
pub mod daily;
pub mod defi;
pub mod momentum;
pub mod trading;

pub use common::merge_settings;
pub use daily::DailyUpdate;
pub use defi::DefiUpdate;
pub use momentum::MomentumUpdate;
pub use trading::TradingUpdate;
