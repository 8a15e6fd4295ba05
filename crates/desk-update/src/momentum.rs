//! Targeted updates to the momentum bot subtree.

use desk_core::{
    prepend_bounded, remove_by_key, upsert_by_key, Activity, BotStatus, ClosedTrade, Extra,
    MomentumBot, Signal, WatchItem, ACTIVITY_LOG_LIMIT, TRADE_HISTORY_LIMIT,
};

use crate::common::merge_settings;

/// One invocation's worth of independent flags; absent fields are no-ops.
#[derive(Debug, Default)]
pub struct MomentumUpdate {
    pub status: Option<BotStatus>,
    pub pnl_24h: Option<f64>,
    pub total_pnl: Option<f64>,
    pub win_rate: Option<f64>,
    pub signal: Option<Signal>,
    pub remove_signal: Option<String>,
    pub watch: Option<WatchItem>,
    pub close_trade: Option<ClosedTrade>,
    pub settings: Option<Extra>,
    pub activity: Option<Activity>,
}

impl MomentumUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.pnl_24h.is_none()
            && self.total_pnl.is_none()
            && self.win_rate.is_none()
            && self.signal.is_none()
            && self.remove_signal.is_none()
            && self.watch.is_none()
            && self.close_trade.is_none()
            && self.settings.is_none()
            && self.activity.is_none()
    }

    /// Apply in the fixed order: status, pnl fields, collection
    /// operations, settings merge, activity append. The signal count
    /// mirrors the collection after every signal operation.
    pub fn apply(self, bot: &mut MomentumBot) {
        if let Some(status) = self.status {
            bot.status = status;
        }
        if let Some(pnl) = self.pnl_24h {
            bot.pnl_24h = Some(pnl);
        }
        if let Some(pnl) = self.total_pnl {
            bot.total_pnl = Some(pnl);
        }
        if let Some(rate) = self.win_rate {
            bot.win_rate = Some(rate);
        }
        if let Some(signal) = self.signal {
            upsert_by_key(&mut bot.signals, signal, |s| &s.symbol);
            bot.active_signals = bot.signals.len();
        }
        if let Some(symbol) = self.remove_signal {
            remove_by_key(&mut bot.signals, &symbol, |s| &s.symbol);
            bot.active_signals = bot.signals.len();
        }
        if let Some(item) = self.watch {
            upsert_by_key(&mut bot.watchlist, item, |w| &w.symbol);
        }
        if let Some(trade) = self.close_trade {
            prepend_bounded(&mut bot.closed_trades, trade, TRADE_HISTORY_LIMIT);
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

    fn signal(symbol: &str, strength: f64) -> Signal {
        serde_json::from_value(json!({"symbol": symbol, "strength": strength})).unwrap()
    }

    fn update_with_signal(symbol: &str, strength: f64) -> MomentumUpdate {
        MomentumUpdate {
            signal: Some(signal(symbol, strength)),
            ..MomentumUpdate::default()
        }
    }

    #[test]
    fn signal_count_tracks_collection_length() {
        let mut bot = MomentumBot::default();
        update_with_signal("SUI", 0.8).apply(&mut bot);
        update_with_signal("XRP", 0.6).apply(&mut bot);
        assert_eq!(bot.active_signals, 2);

        // Replacing does not grow the count.
        update_with_signal("SUI", 0.9).apply(&mut bot);
        assert_eq!(bot.signals.len(), 2);
        assert_eq!(bot.active_signals, 2);

        MomentumUpdate {
            remove_signal: Some("SUI".to_string()),
            ..MomentumUpdate::default()
        }
        .apply(&mut bot);
        assert_eq!(bot.active_signals, 1);
        assert_eq!(bot.signals[0].symbol, "XRP");
    }

    #[test]
    fn removing_absent_signal_is_noop() {
        let mut bot = MomentumBot::default();
        update_with_signal("SUI", 0.8).apply(&mut bot);

        MomentumUpdate {
            remove_signal: Some("DOGE".to_string()),
            ..MomentumUpdate::default()
        }
        .apply(&mut bot);
        assert_eq!(bot.signals.len(), 1);
        assert_eq!(bot.active_signals, 1);
    }

    #[test]
    fn watchlist_upserts_by_symbol() {
        let mut bot = MomentumBot::default();
        // The first-init watchlist already holds XRP/SOL/SUI.
        let enriched: WatchItem =
            serde_json::from_value(json!({"symbol": "SOL", "note": "breakout"})).unwrap();
        MomentumUpdate {
            watch: Some(enriched),
            ..MomentumUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.watchlist.len(), 3);
        assert_eq!(bot.watchlist[1].symbol, "SOL");
        assert_eq!(bot.watchlist[1].extra["note"], "breakout");
    }

    #[test]
    fn closed_trades_are_bounded() {
        let mut bot = MomentumBot::default();
        for i in 0..(TRADE_HISTORY_LIMIT + 5) {
            let trade: ClosedTrade =
                serde_json::from_value(json!({"symbol": "SUI", "seq": i})).unwrap();
            MomentumUpdate {
                close_trade: Some(trade),
                ..MomentumUpdate::default()
            }
            .apply(&mut bot);
        }
        assert_eq!(bot.closed_trades.len(), TRADE_HISTORY_LIMIT);
        assert_eq!(bot.closed_trades[0].extra["seq"], TRADE_HISTORY_LIMIT + 4);
    }

    #[test]
    fn pnl_fields_replace_independently() {
        let mut bot = MomentumBot::default();
        MomentumUpdate {
            total_pnl: Some(150.0),
            win_rate: Some(62.5),
            ..MomentumUpdate::default()
        }
        .apply(&mut bot);
        assert_eq!(bot.total_pnl, Some(150.0));
        assert_eq!(bot.win_rate, Some(62.5));
        assert!(bot.pnl_24h.is_none());
    }
}
