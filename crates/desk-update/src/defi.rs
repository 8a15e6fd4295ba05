//! Targeted updates to the DeFi bot subtree.

use serde_json::Value;

use desk_core::{
    prepend_bounded, upsert_by_key, Activity, BotStatus, DefiBot, Extra, Position, TradeRecord,
    ACTIVITY_LOG_LIMIT, TRADE_HISTORY_LIMIT,
};

use crate::common::merge_settings;

/// One invocation's worth of independent flags. Each set field is applied
/// in isolation against the same loaded state; absent fields are no-ops.
#[derive(Debug, Default)]
pub struct DefiUpdate {
    pub status: Option<BotStatus>,
    pub pnl_24h: Option<f64>,
    pub total_pnl: Option<f64>,
    pub position: Option<Position>,
    pub trade: Option<TradeRecord>,
    pub wallet_main: Option<Value>,
    pub wallet_drift: Option<Value>,
    pub drift_account: Option<Value>,
    pub settings: Option<Extra>,
    pub activity: Option<Activity>,
}

impl DefiUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.pnl_24h.is_none()
            && self.total_pnl.is_none()
            && self.position.is_none()
            && self.trade.is_none()
            && self.wallet_main.is_none()
            && self.wallet_drift.is_none()
            && self.drift_account.is_none()
            && self.settings.is_none()
            && self.activity.is_none()
    }

    /// Apply in the fixed order: status, pnl fields, collection
    /// operations, settings merge, activity append.
    pub fn apply(self, bot: &mut DefiBot) {
        if let Some(status) = self.status {
            bot.status = status;
        }
        if let Some(pnl) = self.pnl_24h {
            bot.pnl_24h = Some(pnl);
        }
        if let Some(pnl) = self.total_pnl {
            bot.total_pnl = Some(pnl);
        }
        if let Some(position) = self.position {
            upsert_by_key(&mut bot.positions, position, |p| &p.market);
            bot.open_positions = bot.positions.len();
        }
        if let Some(trade) = self.trade {
            prepend_bounded(&mut bot.trades, trade, TRADE_HISTORY_LIMIT);
        }
        if let Some(wallet) = self.wallet_main {
            bot.wallets.main = Some(wallet);
        }
        if let Some(wallet) = self.wallet_drift {
            bot.wallets.drift = Some(wallet);
        }
        if let Some(account) = self.drift_account {
            bot.drift_account = Some(account);
        }
        if let Some(settings) = self.settings {
            merge_settings(&mut bot.settings, settings);
        }
        if let Some(activity) = self.activity {
            prepend_bounded(&mut bot.recent_activity, activity, ACTIVITY_LOG_LIMIT);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn position(market: &str, pnl: f64) -> Position {
        serde_json::from_value(json!({"market": market, "pnl": pnl})).unwrap()
    }

    #[test]
    fn upsert_position_replaces_in_place_and_recounts() {
        let mut bot = DefiBot::default();
        DefiUpdate {
            position: Some(position("SOL-PERP", 10.0)),
            ..DefiUpdate::default()
        }
        .apply(&mut bot);
        DefiUpdate {
            position: Some(position("SOL-PERP", 25.0)),
            ..DefiUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.positions.len(), 1);
        assert_eq!(bot.positions[0].extra["pnl"], 25.0);
        assert_eq!(bot.open_positions, 1);
    }

    #[test]
    fn upsert_is_idempotent() {
        let mut bot = DefiBot::default();
        for _ in 0..2 {
            DefiUpdate {
                position: Some(position("ETH-PERP", 5.0)),
                ..DefiUpdate::default()
            }
            .apply(&mut bot);
        }
        assert_eq!(bot.positions.len(), 1);
        assert_eq!(bot.open_positions, 1);
    }

    #[test]
    fn trades_are_bounded_newest_first() {
        let mut bot = DefiBot::default();
        for i in 0..(TRADE_HISTORY_LIMIT + 10) {
            let trade: TradeRecord = serde_json::from_value(json!({"id": i})).unwrap();
            DefiUpdate {
                trade: Some(trade),
                ..DefiUpdate::default()
            }
            .apply(&mut bot);
        }
        assert_eq!(bot.trades.len(), TRADE_HISTORY_LIMIT);
        assert_eq!(bot.trades[0].extra["id"], TRADE_HISTORY_LIMIT + 9);
    }

    #[test]
    fn combined_flags_apply_against_one_state() {
        let mut bot = DefiBot::default();
        DefiUpdate {
            status: Some(BotStatus::Active),
            pnl_24h: Some(12.5),
            activity: Some(Activity::now("trade", "opened SOL-PERP")),
            ..DefiUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.status, BotStatus::Active);
        assert_eq!(bot.pnl_24h, Some(12.5));
        assert_eq!(bot.recent_activity.len(), 1);
        assert_eq!(bot.recent_activity[0].message, "opened SOL-PERP");
    }

    #[test]
    fn wallets_replace_independently() {
        let mut bot = DefiBot::default();
        DefiUpdate {
            wallet_main: Some(json!({"sol": 1.5, "usdc": 200.0})),
            ..DefiUpdate::default()
        }
        .apply(&mut bot);
        DefiUpdate {
            wallet_drift: Some(json!({"sol": 0.2})),
            ..DefiUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.wallets.main.as_ref().unwrap()["usdc"], 200.0);
        assert_eq!(bot.wallets.drift.as_ref().unwrap()["sol"], 0.2);
    }

    #[test]
    fn empty_update_is_detectable() {
        assert!(DefiUpdate::default().is_empty());
        assert!(!DefiUpdate {
            status: Some(BotStatus::Idle),
            ..DefiUpdate::default()
        }
        .is_empty());
    }
}
