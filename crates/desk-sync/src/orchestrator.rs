//! The full-refresh orchestrator.
//!
//! Runs every source adapter concurrently, merges once, saves once. This
//! is the only path that rewrites the whole document; the mutation
//! commands are the incremental path, and both honor the same schema
//! through the shared store.

use tracing::info;

use desk_sources::{
    load_defi_snapshot, load_trading_snapshot, run_scraper, BotFilesConfig, CryptoConfig,
    CryptoPriceClient, QuoteClient, QuotesConfig, ScraperConfig,
};
use desk_store::StateStore;

use crate::error::SyncResult;
use crate::merge::{merge, FetchedSources, MOVER_COUNT};

/// The adapters one sync cycle runs.
pub struct SyncSources {
    crypto: CryptoPriceClient,
    quotes: QuoteClient,
    bot_files: BotFilesConfig,
    scraper: ScraperConfig,
}

impl SyncSources {
    pub fn new(
        crypto: CryptoConfig,
        quotes: QuotesConfig,
        bot_files: BotFilesConfig,
        scraper: ScraperConfig,
    ) -> SyncResult<Self> {
        Ok(Self {
            crypto: CryptoPriceClient::new(crypto)?,
            quotes: QuoteClient::new(quotes)?,
            bot_files,
            scraper,
        })
    }
}

/// Per-source outcome of one sync cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub crypto_ok: bool,
    pub quotes_ok: bool,
    pub defi_ok: bool,
    pub trading_ok: bool,
    pub senator_trades: usize,
}

impl std::fmt::Display for SyncReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn mark(ok: bool) -> &'static str {
            if ok {
                "ok"
            } else {
                "stale"
            }
        }
        writeln!(f, "  crypto prices   {}", mark(self.crypto_ok))?;
        writeln!(f, "  market quotes   {}", mark(self.quotes_ok))?;
        writeln!(f, "  defi bot        {}", mark(self.defi_ok))?;
        writeln!(f, "  trading bot     {}", mark(self.trading_ok))?;
        if self.senator_trades > 0 {
            write!(f, "  senator trades  ok ({})", self.senator_trades)
        } else {
            write!(f, "  senator trades  stale")
        }
    }
}

/// Run one full refresh: fan out all fetches, merge, save.
///
/// A failed source never aborts the cycle; its section degrades to the
/// previously persisted data.
pub async fn run_sync(store: &StateStore, sources: &SyncSources) -> SyncResult<SyncReport> {
    let previous = store.load();

    let (crypto, quotes, defi_bot, trading_bot, senator_trades) = tokio::join!(
        sources.crypto.fetch(),
        sources.quotes.fetch_all(),
        load_defi_snapshot(&sources.bot_files.defi_state),
        load_trading_snapshot(&sources.bot_files.trading_state),
        run_scraper(&sources.scraper),
    );

    let report = SyncReport {
        crypto_ok: crypto.is_some(),
        quotes_ok: quotes.is_some(),
        defi_ok: defi_bot.is_some(),
        trading_ok: trading_bot.is_some(),
        senator_trades: senator_trades.len(),
    };

    let mover_symbols = sources
        .crypto
        .symbols()
        .into_iter()
        .take(MOVER_COUNT)
        .collect();

    let mut next = merge(
        previous,
        FetchedSources {
            crypto,
            quotes,
            defi_bot,
            trading_bot,
            senator_trades,
            mover_symbols,
        },
    );

    store.save(&mut next)?;
    info!(
        crypto = report.crypto_ok,
        quotes = report.quotes_ok,
        defi = report.defi_ok,
        trading = report.trading_ok,
        senator_trades = report.senator_trades,
        "Sync complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::{BotStatus, State};
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Sources that all fail fast: unroutable local endpoints and missing
    /// paths. The cycle must still complete and persist a document.
    fn dead_sources() -> SyncSources {
        let crypto = CryptoConfig {
            api_url: "http://127.0.0.1:1/simple/price".to_string(),
            request_timeout_secs: 1,
            ..CryptoConfig::default()
        };
        let quotes = QuotesConfig {
            chart_url: "http://127.0.0.1:1/chart".to_string(),
            symbols: vec!["VOO".to_string()],
            batch_pause_ms: 0,
            request_timeout_secs: 1,
            ..QuotesConfig::default()
        };
        let bot_files = BotFilesConfig {
            defi_state: PathBuf::from("/nonexistent/defi.json"),
            trading_state: PathBuf::from("/nonexistent/trading.json"),
        };
        let scraper = ScraperConfig {
            workdir: PathBuf::from("/nonexistent"),
            timeout_secs: 1,
            ..ScraperConfig::default()
        };
        SyncSources::new(crypto, quotes, bot_files, scraper).unwrap()
    }

    #[tokio::test]
    async fn all_sources_failing_degrades_to_previous_state() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        let mut seeded = State::default();
        seeded.trading_bot.status = BotStatus::Active;
        seeded.daily.notes = "carry me".to_string();
        store.save(&mut seeded).unwrap();

        let report = run_sync(&store, &dead_sources()).await.unwrap();
        assert!(!report.crypto_ok);
        assert!(!report.defi_ok);
        assert_eq!(report.senator_trades, 0);

        let next = store.load();
        assert_eq!(next.trading_bot.status, BotStatus::Active);
        assert_eq!(next.daily.notes, "carry me");
        assert!(next.last_updated.is_some());
    }

    #[tokio::test]
    async fn first_sync_creates_default_shaped_document() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));

        run_sync(&store, &dead_sources()).await.unwrap();

        let state = store.load_strict().unwrap();
        assert_eq!(state.momentum_bot.watchlist.len(), 3);
        assert_eq!(state.defi_bot.status, BotStatus::Offline);
    }

    #[test]
    fn report_display_names_every_source() {
        let report = SyncReport {
            crypto_ok: true,
            quotes_ok: false,
            defi_ok: true,
            trading_ok: false,
            senator_trades: 4,
        };
        let text = report.to_string();
        assert!(text.contains("crypto prices   ok"));
        assert!(text.contains("market quotes   stale"));
        assert!(text.contains("senator trades  ok (4)"));
    }
}
