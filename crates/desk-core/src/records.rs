//! Keyed and timestamped record types for the document's collections.
//!
//! Mutation payloads arrive as caller-supplied JSON. Each record validates
//! the fields the engine depends on (the key, the fill amounts) and carries
//! the remainder through untouched via a flattened map, so callers can
//! attach whatever detail their bot reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::today_utc;

/// Caller-supplied JSON payload carried through without interpretation.
pub type Extra = Map<String, Value>;

fn default_activity_kind() -> String {
    "info".to_string()
}

/// An open position, keyed by market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub market: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// An active signal on the momentum bot, keyed by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub symbol: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// An active signal on the trading bot, keyed by pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSignal {
    pub pair: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A watchlist entry, keyed by symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchItem {
    pub symbol: String,
    #[serde(flatten)]
    pub extra: Extra,
}

impl WatchItem {
    /// A bare entry with just a symbol, used for the first-init watchlist.
    pub fn bare(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            extra: Extra::new(),
        }
    }
}

/// An open order, keyed by order id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    #[serde(rename = "orderId")]
    pub order_id: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A trade appended to a bot's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A trade fill on the trading bot.
///
/// `total` and `fee` feed the running daily aggregates; missing values
/// count as zero rather than rejecting the fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeFill {
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub fee: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A closed trade on the momentum bot, dated by calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    #[serde(default = "today_utc")]
    pub date: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A closed-position preview imported from the DeFi bot's native file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClosedPosition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(rename = "closedAt", skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// An activity-log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "type", default = "default_activity_kind")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl Activity {
    /// A fresh entry stamped with the current time.
    pub fn now(kind: &str, message: &str) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// A market-mover line in the daily brief: a tracked symbol, its formatted
/// percentage move, and a short note (usually the spot price).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mover {
    pub ticker: String,
    #[serde(rename = "move")]
    pub move_pct: String,
    #[serde(default)]
    pub note: String,
    #[serde(flatten)]
    pub extra: Extra,
}
