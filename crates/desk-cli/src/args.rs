//! Command-line surface.
//!
//! One subcommand per bot/category, mirroring the sync scripts the
//! dashboard's operators drive from cron and ad hoc shells. JSON-valued
//! flags take one encoded record each; absent flags are no-ops.

use clap::{Args, Parser, Subcommand};

use desk_core::BotStatus;

/// Trading desk dashboard state engine.
#[derive(Parser, Debug)]
#[command(name = "desk", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (can also be set via DESK_CONFIG env var)
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Refresh every source and rewrite the full document
    Sync,
    /// Update the DeFi bot subtree
    Defi(DefiArgs),
    /// Update the momentum bot subtree
    Momentum(MomentumArgs),
    /// Update the trading bot subtree
    Trading(TradingArgs),
    /// Update the daily brief
    Daily(DailyArgs),
}

#[derive(Args, Debug, Default)]
pub struct DefiArgs {
    /// Set bot status (Active, Idle, Error, ...)
    #[arg(long)]
    pub status: Option<BotStatus>,
    /// Set 24h PnL
    #[arg(long)]
    pub pnl: Option<f64>,
    /// Set total PnL
    #[arg(long)]
    pub total_pnl: Option<f64>,
    /// Add or update a position (JSON, keyed by market)
    #[arg(long)]
    pub position: Option<String>,
    /// Append a trade to the history (JSON)
    #[arg(long)]
    pub trade: Option<String>,
    /// Replace main wallet balances (JSON)
    #[arg(long)]
    pub wallet_main: Option<String>,
    /// Replace drift wallet balances (JSON)
    #[arg(long)]
    pub wallet_drift: Option<String>,
    /// Replace drift account stats (JSON)
    #[arg(long)]
    pub drift_account: Option<String>,
    /// Merge strategy settings (JSON object, shallow)
    #[arg(long)]
    pub settings: Option<String>,
    /// Append an activity log entry
    #[arg(long)]
    pub activity: Option<String>,
    /// Type tag for the activity entry
    #[arg(long, default_value = "info")]
    pub activity_type: String,
}

#[derive(Args, Debug, Default)]
pub struct MomentumArgs {
    /// Set bot status (Active, Idle, Error, ...)
    #[arg(long)]
    pub status: Option<BotStatus>,
    /// Set 24h PnL
    #[arg(long)]
    pub pnl: Option<f64>,
    /// Set total PnL
    #[arg(long)]
    pub total_pnl: Option<f64>,
    /// Set win rate (percent)
    #[arg(long)]
    pub win_rate: Option<f64>,
    /// Add or update an active signal (JSON, keyed by symbol)
    #[arg(long)]
    pub signal: Option<String>,
    /// Remove the signal for a symbol
    #[arg(long)]
    pub remove_signal: Option<String>,
    /// Add or update a watchlist item (JSON, keyed by symbol)
    #[arg(long)]
    pub watchlist: Option<String>,
    /// Append a closed trade to the history (JSON)
    #[arg(long)]
    pub close_trade: Option<String>,
    /// Merge strategy settings (JSON object, shallow)
    #[arg(long)]
    pub settings: Option<String>,
    /// Append an activity log entry
    #[arg(long)]
    pub activity: Option<String>,
    /// Type tag for the activity entry
    #[arg(long, default_value = "info")]
    pub activity_type: String,
}

#[derive(Args, Debug, Default)]
pub struct TradingArgs {
    /// Set bot status (Active, Idle, Error, ...)
    #[arg(long)]
    pub status: Option<BotStatus>,
    /// Set 24h PnL
    #[arg(long)]
    pub pnl: Option<f64>,
    /// Set total PnL
    #[arg(long)]
    pub total_pnl: Option<f64>,
    /// Set win rate (percent)
    #[arg(long)]
    pub win_rate: Option<f64>,
    /// Replace exchange balances (JSON)
    #[arg(long)]
    pub balances: Option<String>,
    /// Add or update an active signal (JSON, keyed by pair)
    #[arg(long)]
    pub signal: Option<String>,
    /// Remove the signal for a pair
    #[arg(long)]
    pub remove_signal: Option<String>,
    /// Add or update an open order (JSON, keyed by orderId)
    #[arg(long)]
    pub order: Option<String>,
    /// Remove the open order with this id
    #[arg(long)]
    pub remove_order: Option<String>,
    /// Record a trade fill (JSON; accumulates today's stats)
    #[arg(long)]
    pub fill: Option<String>,
    /// Merge strategy settings (JSON object, shallow)
    #[arg(long)]
    pub settings: Option<String>,
    /// Append an activity log entry
    #[arg(long)]
    pub activity: Option<String>,
    /// Type tag for the activity entry
    #[arg(long, default_value = "info")]
    pub activity_type: String,
}

#[derive(Args, Debug, Default)]
pub struct DailyArgs {
    /// Set the daily notes
    #[arg(long)]
    pub notes: Option<String>,
    /// Append a market mover entry (JSON, keyed fields: ticker/move/note)
    #[arg(long)]
    pub mover: Option<String>,
    /// Append an economic calendar event (JSON)
    #[arg(long)]
    pub event: Option<String>,
    /// Prepend a senator trade entry (JSON)
    #[arg(long)]
    pub senator_trade: Option<String>,
    /// Clear market movers
    #[arg(long)]
    pub clear_movers: bool,
    /// Clear the economic calendar
    #[arg(long)]
    pub clear_events: bool,
    /// Clear senator trades
    #[arg(long)]
    pub clear_senators: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_combined_mutation_flags() {
        let cli = Cli::try_parse_from([
            "desk",
            "defi",
            "--status",
            "Active",
            "--pnl",
            "12.5",
            "--position",
            r#"{"market":"SOL-PERP","pnl":25}"#,
            "--activity",
            "opened SOL-PERP",
            "--activity-type",
            "trade",
        ])
        .unwrap();

        match cli.command {
            Command::Defi(args) => {
                assert_eq!(args.status, Some(BotStatus::Active));
                assert_eq!(args.pnl, Some(12.5));
                assert!(args.position.is_some());
                assert_eq!(args.activity_type, "trade");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn status_classifies_loose_input() {
        let cli = Cli::try_parse_from(["desk", "momentum", "--status", "RUNNING"]).unwrap();
        match cli.command {
            Command::Momentum(args) => assert_eq!(args.status, Some(BotStatus::Running)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn daily_clear_flags_are_plain_switches() {
        let cli =
            Cli::try_parse_from(["desk", "daily", "--clear-movers", "--clear-senators"]).unwrap();
        match cli.command {
            Command::Daily(args) => {
                assert!(args.clear_movers);
                assert!(!args.clear_events);
                assert!(args.clear_senators);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_non_numeric_pnl() {
        assert!(Cli::try_parse_from(["desk", "trading", "--pnl", "lots"]).is_err());
    }
}
