//! Bot state-file adapters.
//!
//! The DeFi and trading bots each maintain their own state file in their
//! own schema. These readers normalize a native file into the dashboard's
//! bot subtree shape; a missing or unreadable file degrades to an absent
//! result and the merge keeps the previous subtree.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use desk_core::{
    Activity, BotStatus, ClosedPosition, DefiBot, Position, TradingBot, Wallets,
    IMPORT_PREVIEW_LIMIT,
};

use crate::error::SourceResult;

fn home() -> PathBuf {
    std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default()
}

fn default_defi_state() -> PathBuf {
    home().join("clawd/defi-bot/dashboard/state.json")
}

fn default_trading_state() -> PathBuf {
    home().join("clawd/jarvis-live/state.json")
}

/// Locations of the bots' native state files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotFilesConfig {
    #[serde(default = "default_defi_state")]
    pub defi_state: PathBuf,
    #[serde(default = "default_trading_state")]
    pub trading_state: PathBuf,
}

impl Default for BotFilesConfig {
    fn default() -> Self {
        Self {
            defi_state: default_defi_state(),
            trading_state: default_trading_state(),
        }
    }
}

async fn read_json(path: &Path) -> SourceResult<Value> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Read and normalize the DeFi bot's native state file.
pub async fn load_defi_snapshot(path: &Path) -> Option<DefiBot> {
    if !path.exists() {
        warn!(path = %path.display(), "DeFi bot state not found");
        return None;
    }
    match read_json(path).await {
        Ok(data) => {
            info!(path = %path.display(), "Loaded DeFi bot state");
            Some(normalize_defi(&data))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load DeFi bot state");
            None
        }
    }
}

/// Read and normalize the trading bot's native state file.
pub async fn load_trading_snapshot(path: &Path) -> Option<TradingBot> {
    if !path.exists() {
        warn!(path = %path.display(), "Trading bot state not found");
        return None;
    }
    match read_json(path).await {
        Ok(data) => {
            info!(path = %path.display(), "Loaded trading bot state");
            Some(normalize_trading(&data))
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to load trading bot state");
            None
        }
    }
}

fn normalize_defi(data: &Value) -> DefiBot {
    let drift = &data["drift"];

    let positions: Vec<Position> = array_of(&drift["positions"], "position");
    let open_positions = positions.len();

    let closed_positions = drift["closedPositions"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .take(IMPORT_PREVIEW_LIMIT)
                .map(|p| ClosedPosition {
                    asset: p["asset"].as_str().map(String::from),
                    direction: p["direction"].as_str().map(String::from),
                    pnl: p["pnl"].as_f64(),
                    closed_at: opt_value(&p["closedAt"]),
                    reason: p["reason"].as_str().map(String::from),
                })
                .collect()
        })
        .unwrap_or_default();

    DefiBot {
        status: BotStatus::classify(data["status"].as_str().unwrap_or("UNKNOWN")),
        version: Some(data["version"].as_str().unwrap_or("?").to_string()),
        equity: Some(drift["equity"].as_f64().unwrap_or(0.0)),
        leverage: Some(drift["leverage"].as_f64().unwrap_or(0.0)),
        total_collateral: Some(drift["totalCollateral"].as_f64().unwrap_or(0.0)),
        free_collateral: Some(drift["freeCollateral"].as_f64().unwrap_or(0.0)),
        unrealized_pnl: Some(drift["unrealizedPnl"].as_f64().unwrap_or(0.0)),
        open_positions,
        wallets: Wallets {
            main: opt_value(&data["wallets"]["main"]),
            drift: opt_value(&data["wallets"]["drift"]),
        },
        positions,
        closed_positions,
        recent_activity: activity_preview(&data["activityLog"]),
        ..DefiBot::default()
    }
}

fn normalize_trading(data: &Value) -> TradingBot {
    let account = &data["account"];
    let balance = account["balance"].as_f64().unwrap_or(0.0);
    let starting_balance = account["startingBalance"].as_f64().unwrap_or(10_000.0);
    let pnl_percent = if starting_balance == 0.0 {
        0.0
    } else {
        (balance / starting_balance - 1.0) * 100.0
    };

    TradingBot {
        status: BotStatus::classify(data["mode"].as_str().unwrap_or("UNKNOWN")),
        version: Some(data["version"].as_str().unwrap_or("?").to_string()),
        balance: Some(balance),
        starting_balance: Some(starting_balance),
        total_pnl: Some(balance - starting_balance),
        pnl_percent: Some(pnl_percent),
        closed_trades: account["closedTrades"].as_u64(),
        prices: data["prices"].as_object().cloned().unwrap_or_default(),
        levels: data["levels"].as_object().cloned().unwrap_or_default(),
        last_trade: opt_value(&data["lastTrade"]),
        signal: non_empty_str(&data["status"]["signal"]),
        next_action: non_empty_str(&data["status"]["nextAction"]),
        recent_activity: activity_preview(&data["activityLog"]),
        ..TradingBot::default()
    }
}

/// Decode each array entry leniently, skipping anything that does not
/// carry the fields we depend on.
fn array_of<T: serde::de::DeserializeOwned>(value: &Value, what: &str) -> Vec<T> {
    value
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                    Ok(decoded) => Some(decoded),
                    Err(e) => {
                        warn!(error = %e, "Skipping malformed {what} entry");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn activity_preview(value: &Value) -> Vec<Activity> {
    let mut entries: Vec<Activity> = array_of(value, "activity");
    entries.truncate(IMPORT_PREVIEW_LIMIT);
    entries
}

fn opt_value(value: &Value) -> Option<Value> {
    if value.is_null() {
        None
    } else {
        Some(value.clone())
    }
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from)
}
