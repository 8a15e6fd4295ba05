//! Targeted updates to the trading bot subtree.

use serde_json::Value;

use desk_core::{
    prepend_bounded, remove_by_key, upsert_by_key, Activity, BotStatus, Extra, OpenOrder,
    PairSignal, TradeFill, TradingBot, ACTIVITY_LOG_LIMIT, TRADE_HISTORY_LIMIT,
};

use crate::common::merge_settings;

/// One invocation's worth of independent flags; absent fields are no-ops.
#[derive(Debug, Default)]
pub struct TradingUpdate {
    pub status: Option<BotStatus>,
    pub pnl_24h: Option<f64>,
    pub total_pnl: Option<f64>,
    pub win_rate: Option<f64>,
    pub balances: Option<Value>,
    pub signal: Option<PairSignal>,
    pub remove_signal: Option<String>,
    pub order: Option<OpenOrder>,
    pub remove_order: Option<String>,
    pub fill: Option<TradeFill>,
    pub settings: Option<Extra>,
    pub activity: Option<Activity>,
}

impl TradingUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.pnl_24h.is_none()
            && self.total_pnl.is_none()
            && self.win_rate.is_none()
            && self.balances.is_none()
            && self.signal.is_none()
            && self.remove_signal.is_none()
            && self.order.is_none()
            && self.remove_order.is_none()
            && self.fill.is_none()
            && self.settings.is_none()
            && self.activity.is_none()
    }

    /// Apply in the fixed order: status, pnl/balance fields, collection
    /// operations, settings merge, activity append.
    ///
    /// A fill both records the trade and accumulates the running daily
    /// aggregates; `trades24h` is recomputed from `todayStats`, never
    /// incremented on its own.
    pub fn apply(self, bot: &mut TradingBot) {
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
        if let Some(balances) = self.balances {
            bot.balances = Some(balances);
        }
        if let Some(signal) = self.signal {
            upsert_by_key(&mut bot.signals, signal, |s| &s.pair);
        }
        if let Some(pair) = self.remove_signal {
            remove_by_key(&mut bot.signals, &pair, |s| &s.pair);
        }
        if let Some(order) = self.order {
            upsert_by_key(&mut bot.open_orders, order, |o| &o.order_id);
        }
        if let Some(order_id) = self.remove_order {
            remove_by_key(&mut bot.open_orders, &order_id, |o| &o.order_id);
        }
        if let Some(fill) = self.fill {
            bot.today_stats.trades += 1;
            bot.today_stats.volume += fill.total;
            bot.today_stats.fees += fill.fee;
            bot.trades_24h = bot.today_stats.trades;
            prepend_bounded(&mut bot.trade_history, fill, TRADE_HISTORY_LIMIT);
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
    use desk_core::TodayStats;
    use serde_json::json;

    fn fill(total: f64, fee: f64) -> TradeFill {
        serde_json::from_value(json!({"total": total, "fee": fee, "pair": "BTC-USD"})).unwrap()
    }

    #[test]
    fn fill_accumulates_today_stats() {
        let mut bot = TradingBot::default();
        bot.today_stats = TodayStats {
            trades: 2,
            volume: 500.0,
            fees: 1.5,
        };
        bot.trades_24h = 2;

        TradingUpdate {
            fill: Some(fill(100.0, 0.3)),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.today_stats.trades, 3);
        assert_eq!(bot.today_stats.volume, 600.0);
        assert!((bot.today_stats.fees - 1.8).abs() < 1e-9);
        assert_eq!(bot.trades_24h, 3);
        assert_eq!(bot.trade_history.len(), 1);
        assert_eq!(bot.trade_history[0].total, 100.0);
    }

    #[test]
    fn fill_history_is_bounded_newest_first() {
        let mut bot = TradingBot::default();
        for i in 0..(TRADE_HISTORY_LIMIT + 3) {
            TradingUpdate {
                fill: Some(fill(i as f64, 0.0)),
                ..TradingUpdate::default()
            }
            .apply(&mut bot);
        }
        assert_eq!(bot.trade_history.len(), TRADE_HISTORY_LIMIT);
        assert_eq!(bot.trade_history[0].total, (TRADE_HISTORY_LIMIT + 2) as f64);
        // The aggregates keep counting past the history bound.
        assert_eq!(bot.today_stats.trades, (TRADE_HISTORY_LIMIT + 3) as u64);
    }

    #[test]
    fn order_upsert_replaces_by_id() {
        let mut bot = TradingBot::default();
        let first: OpenOrder =
            serde_json::from_value(json!({"orderId": "ord-1", "price": 100.0})).unwrap();
        let second: OpenOrder =
            serde_json::from_value(json!({"orderId": "ord-1", "price": 105.0})).unwrap();

        TradingUpdate {
            order: Some(first),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);
        TradingUpdate {
            order: Some(second),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.open_orders.len(), 1);
        assert_eq!(bot.open_orders[0].extra["price"], 105.0);
    }

    #[test]
    fn remove_order_is_idempotent() {
        let mut bot = TradingBot::default();
        let order: OpenOrder = serde_json::from_value(json!({"orderId": "ord-9"})).unwrap();
        TradingUpdate {
            order: Some(order),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);

        for _ in 0..2 {
            TradingUpdate {
                remove_order: Some("ord-9".to_string()),
                ..TradingUpdate::default()
            }
            .apply(&mut bot);
        }
        assert!(bot.open_orders.is_empty());
    }

    #[test]
    fn settings_merge_is_shallow() {
        let mut bot = TradingBot::default();
        TradingUpdate {
            settings: Some(
                json!({"risk": {"maxDrawdown": 0.1, "maxLeverage": 3}, "indicators": {"rsi": 14}})
                    .as_object()
                    .cloned()
                    .unwrap(),
            ),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);
        TradingUpdate {
            settings: Some(json!({"risk": {"maxDrawdown": 0.2}}).as_object().cloned().unwrap()),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);

        assert_eq!(bot.settings["risk"], json!({"maxDrawdown": 0.2}));
        assert_eq!(bot.settings["indicators"], json!({"rsi": 14}));
    }

    #[test]
    fn signal_upsert_and_remove_by_pair() {
        let mut bot = TradingBot::default();
        let signal: PairSignal =
            serde_json::from_value(json!({"pair": "ETH-USD", "side": "buy"})).unwrap();
        TradingUpdate {
            signal: Some(signal),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);
        assert_eq!(bot.signals.len(), 1);

        TradingUpdate {
            remove_signal: Some("ETH-USD".to_string()),
            ..TradingUpdate::default()
        }
        .apply(&mut bot);
        assert!(bot.signals.is_empty());
    }
}
