//! Command execution.
//!
//! Mutation commands share one contract: parse every structured argument
//! first, load the state strictly (a missing or corrupt document is fatal
//! here, there is nothing meaningful to update), apply the typed update,
//! save once, confirm on stdout. Nothing is written when parsing or
//! loading fails.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::warn;

use desk_core::{Activity, Extra};
use desk_store::StateStore;
use desk_sync::{run_sync, SyncSources};
use desk_update::{DailyUpdate, DefiUpdate, MomentumUpdate, TradingUpdate};

use crate::args::{DailyArgs, DefiArgs, MomentumArgs, TradingArgs};
use crate::config::DeskConfig;

fn parse_json_flag<T: DeserializeOwned>(flag: &str, raw: Option<&str>) -> Result<Option<T>> {
    raw.map(|text| {
        serde_json::from_str(text).with_context(|| format!("invalid JSON for --{flag}"))
    })
    .transpose()
}

fn parse_settings(raw: Option<&str>) -> Result<Option<Extra>> {
    parse_json_flag("settings", raw)
}

fn activity_entry(message: &Option<String>, kind: &str) -> Option<Activity> {
    message.as_ref().map(|text| Activity::now(kind, text))
}

fn confirm(store: &StateStore) {
    println!("State updated: {}", store.path().display());
}

/// Full refresh: fan out every adapter, merge, save.
pub async fn sync(store: &StateStore, config: &DeskConfig) -> Result<()> {
    let sources = SyncSources::new(
        config.crypto.clone(),
        config.quotes.clone(),
        config.bot_files.clone(),
        config.scraper.clone(),
    )?;
    let report = run_sync(store, &sources).await?;

    println!("State synced: {}", store.path().display());
    println!("{report}");
    Ok(())
}

pub fn defi(store: &StateStore, args: DefiArgs) -> Result<()> {
    let update = DefiUpdate {
        status: args.status,
        pnl_24h: args.pnl,
        total_pnl: args.total_pnl,
        position: parse_json_flag("position", args.position.as_deref())?,
        trade: parse_json_flag("trade", args.trade.as_deref())?,
        wallet_main: parse_json_flag("wallet-main", args.wallet_main.as_deref())?,
        wallet_drift: parse_json_flag("wallet-drift", args.wallet_drift.as_deref())?,
        drift_account: parse_json_flag("drift-account", args.drift_account.as_deref())?,
        settings: parse_settings(args.settings.as_deref())?,
        activity: activity_entry(&args.activity, &args.activity_type),
    };
    if update.is_empty() {
        warn!("No update flags given; only lastUpdated will change");
    }

    let mut state = store.load_strict().context("cannot load state")?;
    update.apply(&mut state.defi_bot);
    store.save(&mut state)?;
    confirm(store);
    Ok(())
}

pub fn momentum(store: &StateStore, args: MomentumArgs) -> Result<()> {
    let update = MomentumUpdate {
        status: args.status,
        pnl_24h: args.pnl,
        total_pnl: args.total_pnl,
        win_rate: args.win_rate,
        signal: parse_json_flag("signal", args.signal.as_deref())?,
        remove_signal: args.remove_signal,
        watch: parse_json_flag("watchlist", args.watchlist.as_deref())?,
        close_trade: parse_json_flag("close-trade", args.close_trade.as_deref())?,
        settings: parse_settings(args.settings.as_deref())?,
        activity: activity_entry(&args.activity, &args.activity_type),
    };
    if update.is_empty() {
        warn!("No update flags given; only lastUpdated will change");
    }

    let mut state = store.load_strict().context("cannot load state")?;
    update.apply(&mut state.momentum_bot);
    store.save(&mut state)?;
    confirm(store);
    Ok(())
}

pub fn trading(store: &StateStore, args: TradingArgs) -> Result<()> {
    let update = TradingUpdate {
        status: args.status,
        pnl_24h: args.pnl,
        total_pnl: args.total_pnl,
        win_rate: args.win_rate,
        balances: parse_json_flag("balances", args.balances.as_deref())?,
        signal: parse_json_flag("signal", args.signal.as_deref())?,
        remove_signal: args.remove_signal,
        order: parse_json_flag("order", args.order.as_deref())?,
        remove_order: args.remove_order,
        fill: parse_json_flag("fill", args.fill.as_deref())?,
        settings: parse_settings(args.settings.as_deref())?,
        activity: activity_entry(&args.activity, &args.activity_type),
    };
    if update.is_empty() {
        warn!("No update flags given; only lastUpdated will change");
    }

    let mut state = store.load_strict().context("cannot load state")?;
    update.apply(&mut state.trading_bot);
    store.save(&mut state)?;
    confirm(store);
    Ok(())
}

pub fn daily(store: &StateStore, args: DailyArgs) -> Result<()> {
    let update = DailyUpdate {
        notes: args.notes,
        mover: parse_json_flag("mover", args.mover.as_deref())?,
        event: parse_json_flag("event", args.event.as_deref())?,
        senator_trade: parse_json_flag("senator-trade", args.senator_trade.as_deref())?,
        clear_movers: args.clear_movers,
        clear_events: args.clear_events,
        clear_senators: args.clear_senators,
    };
    if update.is_empty() {
        warn!("No update flags given; only the date and lastUpdated will change");
    }

    let mut state = store.load_strict().context("cannot load state")?;
    update.apply(&mut state.daily);
    store.save(&mut state)?;
    confirm(store);
    Ok(())
}
