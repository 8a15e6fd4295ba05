//! Canonical state document for the desk dashboard.
//!
//! This crate owns the schema of the persisted document and the invariants
//! on its collections:
//! - `State`: the single root document (crypto prices, market quotes,
//!   three bot subtrees, daily brief)
//! - `BotStatus`: closed status classification for free-form source strings
//! - Keyed records with upsert-by-key semantics
//! - Bounded newest-first history lists

pub mod collections;
pub mod records;
pub mod state;
pub mod status;

pub use collections::{
    prepend_bounded, remove_by_key, upsert_by_key, ACTIVITY_LOG_LIMIT, IMPORT_PREVIEW_LIMIT,
    SENATOR_TRADES_LIMIT, TRADE_HISTORY_LIMIT,
};
pub use records::{
    Activity, ClosedPosition, ClosedTrade, Extra, Mover, OpenOrder, PairSignal, Position, Signal,
    TradeFill, TradeRecord, WatchItem,
};
pub use state::{
    today_utc, CryptoPrice, Daily, DefiBot, MomentumBot, Quote, State, TodayStats, TradingBot,
    Wallets,
};
pub use status::BotStatus;
