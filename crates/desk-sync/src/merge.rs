//! The merge engine.
//!
//! Computes the next document from the previous one and whatever the
//! source adapters produced this cycle. The function is total: any
//! combination of present and absent inputs yields a well-formed document.
//! A section with no fresh value this cycle is carried over from the
//! previous document verbatim; a section is always replaced whole, never
//! half-written.

use std::collections::BTreeMap;

use serde_json::Value;

use desk_core::{today_utc, CryptoPrice, Daily, DefiBot, Extra, Mover, Quote, State, TradingBot};

/// How many tracked symbols feed the daily market-movers list.
pub const MOVER_COUNT: usize = 3;

/// Everything one refresh cycle produced.
///
/// `None` means the source was unavailable this cycle. `senator_trades`
/// uses an empty list for the same purpose: an empty scrape is
/// failure-equivalent, never "zero trades today".
#[derive(Debug, Default)]
pub struct FetchedSources {
    pub crypto: Option<BTreeMap<String, CryptoPrice>>,
    pub quotes: Option<BTreeMap<String, Quote>>,
    pub defi_bot: Option<DefiBot>,
    pub trading_bot: Option<TradingBot>,
    pub senator_trades: Vec<Value>,
    /// Tracked symbols to derive movers from, in config order.
    pub mover_symbols: Vec<String>,
}

/// Merge one cycle's fetches into the previous document.
pub fn merge(previous: State, fetched: FetchedSources) -> State {
    let market_movers = match &fetched.crypto {
        Some(prices) => derive_movers(&fetched.mover_symbols, prices),
        None => previous.daily.market_movers,
    };

    let senator_trades = if fetched.senator_trades.is_empty() {
        previous.daily.senator_trades
    } else {
        fetched.senator_trades
    };

    State {
        // Restamped by the store on save.
        last_updated: previous.last_updated,
        crypto_prices: fetched.crypto.unwrap_or(previous.crypto_prices),
        market_quotes: fetched.quotes.unwrap_or(previous.market_quotes),
        defi_bot: fetched.defi_bot.unwrap_or(previous.defi_bot),
        // No adapter feeds the momentum bot; its subtree is always carried.
        momentum_bot: previous.momentum_bot,
        trading_bot: fetched.trading_bot.unwrap_or(previous.trading_bot),
        daily: Daily {
            date: today_utc(),
            notes: previous.daily.notes,
            market_movers,
            econ_calendar: previous.daily.econ_calendar,
            senator_trades,
        },
    }
}

/// One mover line per tracked symbol present in the fetched batch.
fn derive_movers(symbols: &[String], prices: &BTreeMap<String, CryptoPrice>) -> Vec<Mover> {
    symbols
        .iter()
        .take(MOVER_COUNT)
        .filter_map(|symbol| {
            prices.get(symbol).map(|price| Mover {
                ticker: symbol.clone(),
                move_pct: format_pct(price.change_24h),
                note: format_usd(price.price),
                extra: Extra::new(),
            })
        })
        .collect()
}

/// Sign-prefixed percentage, e.g. "+1.25%".
fn format_pct(change: f64) -> String {
    let sign = if change > 0.0 { "+" } else { "" };
    format!("{sign}{change}%")
}

/// Dollar amount with thousands grouping and at most three decimals,
/// e.g. "$43,250.5".
fn format_usd(price: f64) -> String {
    let sign = if price < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", price.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::new();
    let digits = int_part.as_bytes();
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit as char);
    }

    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac}")
    }
}
