//! Targeted updates to the daily brief.

use serde_json::Value;

use desk_core::{prepend_bounded, today_utc, Daily, Mover, SENATOR_TRADES_LIMIT};

/// One invocation's worth of independent flags; absent fields are no-ops.
///
/// The date is not settable: any daily mutation re-derives it to today.
#[derive(Debug, Default)]
pub struct DailyUpdate {
    pub notes: Option<String>,
    pub mover: Option<Mover>,
    pub event: Option<Value>,
    pub senator_trade: Option<Value>,
    pub clear_movers: bool,
    pub clear_events: bool,
    pub clear_senators: bool,
}

impl DailyUpdate {
    pub fn is_empty(&self) -> bool {
        self.notes.is_none()
            && self.mover.is_none()
            && self.event.is_none()
            && self.senator_trade.is_none()
            && !self.clear_movers
            && !self.clear_events
            && !self.clear_senators
    }

    pub fn apply(self, daily: &mut Daily) {
        daily.date = today_utc();

        if let Some(notes) = self.notes {
            daily.notes = notes;
        }
        if let Some(mover) = self.mover {
            daily.market_movers.push(mover);
        }
        if let Some(event) = self.event {
            daily.econ_calendar.push(event);
        }
        if let Some(trade) = self.senator_trade {
            prepend_bounded(&mut daily.senator_trades, trade, SENATOR_TRADES_LIMIT);
        }
        if self.clear_movers {
            daily.market_movers.clear();
        }
        if self.clear_events {
            daily.econ_calendar.clear();
        }
        if self.clear_senators {
            daily.senator_trades.clear();
        }
    }
}
