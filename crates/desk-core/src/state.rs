//! The persisted dashboard document.
//!
//! One JSON file holds everything the dashboard renders: the latest price
//! batches, one subtree per bot, and the daily brief. Every section is
//! `#[serde(default)]` so a missing or partial document always parses into
//! a well-formed value; the dashboard treats every field as optional and
//! renders a placeholder for anything absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::records::{
    Activity, ClosedPosition, ClosedTrade, Extra, Mover, OpenOrder, PairSignal, Position, Signal,
    TradeFill, TradeRecord, WatchItem,
};
use crate::status::BotStatus;

/// Today's calendar date (UTC) in `YYYY-MM-DD` form.
pub fn today_utc() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// The root document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct State {
    /// Stamped by the store on every save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub crypto_prices: BTreeMap<String, CryptoPrice>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub market_quotes: BTreeMap<String, Quote>,
    pub defi_bot: DefiBot,
    pub momentum_bot: MomentumBot,
    pub trading_bot: TradingBot,
    pub daily: Daily,
}

/// One crypto spot price with its 24h change, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CryptoPrice {
    pub price: f64,
    #[serde(rename = "change24h")]
    pub change_24h: f64,
}

/// One traditional-market quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_state: Option<String>,
}

/// Wallet balances reported by the DeFi bot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wallets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<Value>,
}

impl Wallets {
    pub fn is_empty(&self) -> bool {
        self.main.is_none() && self.drift.is_none()
    }
}

/// The DeFi (Drift) bot subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DefiBot {
    pub status: BotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_collateral: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_collateral: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrealized_pnl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pnl: Option<f64>,
    #[serde(rename = "pnl24h", skip_serializing_if = "Option::is_none")]
    pub pnl_24h: Option<f64>,
    /// Mirror of `positions.len()`, recomputed on every positions change.
    pub open_positions: usize,
    #[serde(skip_serializing_if = "Wallets::is_empty")]
    pub wallets: Wallets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift_account: Option<Value>,
    pub positions: Vec<Position>,
    pub closed_positions: Vec<ClosedPosition>,
    pub trades: Vec<TradeRecord>,
    pub recent_activity: Vec<Activity>,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub settings: Extra,
}

impl Default for DefiBot {
    fn default() -> Self {
        Self {
            status: BotStatus::Offline,
            version: None,
            equity: None,
            leverage: None,
            total_collateral: None,
            free_collateral: None,
            unrealized_pnl: None,
            total_pnl: None,
            pnl_24h: None,
            open_positions: 0,
            wallets: Wallets::default(),
            drift_account: None,
            positions: Vec::new(),
            closed_positions: Vec::new(),
            trades: Vec::new(),
            recent_activity: Vec::new(),
            settings: Extra::new(),
        }
    }
}

/// The momentum bot subtree.
///
/// This bot has no full-sync adapter; its subtree is maintained entirely by
/// the mutation commands and carried over unchanged by every sync.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MomentumBot {
    pub status: BotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pnl: Option<f64>,
    #[serde(rename = "pnl24h", skip_serializing_if = "Option::is_none")]
    pub pnl_24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    /// Mirror of `signals.len()`, recomputed on every signals change.
    pub active_signals: usize,
    pub signals: Vec<Signal>,
    pub watchlist: Vec<WatchItem>,
    pub closed_trades: Vec<ClosedTrade>,
    pub recent_activity: Vec<Activity>,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub settings: Extra,
}

impl Default for MomentumBot {
    fn default() -> Self {
        Self {
            status: BotStatus::Idle,
            total_pnl: None,
            pnl_24h: None,
            win_rate: None,
            active_signals: 0,
            signals: Vec::new(),
            watchlist: vec![
                WatchItem::bare("XRP"),
                WatchItem::bare("SOL"),
                WatchItem::bare("SUI"),
            ],
            closed_trades: Vec::new(),
            recent_activity: Vec::new(),
            settings: Extra::new(),
        }
    }
}

/// Running aggregates for the trading bot's current calendar day.
///
/// Monotonically increasing within the day; the day-boundary reset is
/// handled outside this system.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodayStats {
    pub trades: u64,
    pub volume: f64,
    pub fees: f64,
}

/// The spot trading bot subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TradingBot {
    pub status: BotStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_balance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pnl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pnl_percent: Option<f64>,
    #[serde(rename = "pnl24h", skip_serializing_if = "Option::is_none")]
    pub pnl_24h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    /// Lifetime closed-trade count as reported by the bot's native file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_trades: Option<u64>,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub prices: Extra,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub levels: Extra,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_trade: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balances: Option<Value>,
    pub today_stats: TodayStats,
    /// Mirror of `today_stats.trades`.
    #[serde(rename = "trades24h")]
    pub trades_24h: u64,
    pub signals: Vec<PairSignal>,
    pub open_orders: Vec<OpenOrder>,
    pub trade_history: Vec<TradeFill>,
    pub recent_activity: Vec<Activity>,
    #[serde(skip_serializing_if = "Extra::is_empty")]
    pub settings: Extra,
}

impl Default for TradingBot {
    fn default() -> Self {
        Self {
            status: BotStatus::Offline,
            version: None,
            balance: None,
            starting_balance: None,
            total_pnl: None,
            pnl_percent: None,
            pnl_24h: None,
            win_rate: None,
            closed_trades: None,
            prices: Extra::new(),
            levels: Extra::new(),
            last_trade: None,
            signal: None,
            next_action: None,
            balances: None,
            today_stats: TodayStats::default(),
            trades_24h: 0,
            signals: Vec::new(),
            open_orders: Vec::new(),
            trade_history: Vec::new(),
            recent_activity: Vec::new(),
            settings: Extra::new(),
        }
    }
}

/// The daily brief: notes, movers, calendar, and scraped senator trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Daily {
    /// Always re-derived to today on any merge or daily mutation.
    pub date: String,
    pub notes: String,
    pub market_movers: Vec<Mover>,
    pub econ_calendar: Vec<Value>,
    pub senator_trades: Vec<Value>,
}

impl Default for Daily {
    fn default() -> Self {
        Self {
            date: today_utc(),
            notes: String::new(),
            market_movers: Vec::new(),
            econ_calendar: Vec::new(),
            senator_trades: Vec::new(),
        }
    }
}
