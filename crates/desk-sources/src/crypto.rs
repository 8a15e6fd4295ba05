//! Crypto price batch adapter (CoinGecko).
//!
//! One request fetches spot price and 24h change for every tracked coin.
//! Any failure degrades to an absent result; the merge keeps the previous
//! prices in that case.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use desk_core::CryptoPrice;

use crate::error::{SourceError, SourceResult};

fn default_api_url() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_tickers() -> Vec<CryptoTicker> {
    [
        ("BTC", "bitcoin"),
        ("ETH", "ethereum"),
        ("SOL", "solana"),
        ("XRP", "ripple"),
        ("SUI", "sui"),
    ]
    .into_iter()
    .map(|(symbol, id)| CryptoTicker {
        symbol: symbol.to_string(),
        coingecko_id: id.to_string(),
    })
    .collect()
}

/// One tracked coin: dashboard symbol plus its CoinGecko id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoTicker {
    pub symbol: String,
    pub coingecko_id: String,
}

/// Crypto adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CryptoConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_tickers")]
    pub tickers: Vec<CryptoTicker>,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_timeout_secs(),
            tickers: default_tickers(),
        }
    }
}

/// Client for the CoinGecko simple-price endpoint.
pub struct CryptoPriceClient {
    client: Client,
    config: CryptoConfig,
}

impl CryptoPriceClient {
    pub fn new(config: CryptoConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SourceError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Tracked symbols, in config order.
    pub fn symbols(&self) -> Vec<String> {
        self.config
            .tickers
            .iter()
            .map(|t| t.symbol.clone())
            .collect()
    }

    /// Fetch the full price batch, or `None` when the source is
    /// unavailable this cycle.
    pub async fn fetch(&self) -> Option<BTreeMap<String, CryptoPrice>> {
        match self.fetch_inner().await {
            Ok(prices) => {
                info!(coins = prices.len(), "Fetched crypto prices");
                Some(prices)
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch crypto prices");
                None
            }
        }
    }

    async fn fetch_inner(&self) -> SourceResult<BTreeMap<String, CryptoPrice>> {
        let ids: Vec<&str> = self
            .config
            .tickers
            .iter()
            .map(|t| t.coingecko_id.as_str())
            .collect();
        let url = format!(
            "{}?ids={}&vs_currencies=usd&include_24hr_change=true",
            self.config.api_url,
            ids.join(",")
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Http(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http(format!("HTTP {status}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Http(format!("failed to parse response: {e}")))?;

        Ok(normalize(&self.config.tickers, &body))
    }
}

/// Map the raw id-keyed response onto symbol-keyed records. Coins missing
/// from the response come back zeroed, matching the upstream contract of
/// treating unknown ids as zero rather than failing the batch.
fn normalize(tickers: &[CryptoTicker], body: &Value) -> BTreeMap<String, CryptoPrice> {
    tickers
        .iter()
        .map(|ticker| {
            let entry = &body[&ticker.coingecko_id];
            let price = entry["usd"].as_f64().unwrap_or(0.0);
            let change = entry["usd_24h_change"].as_f64().unwrap_or(0.0);
            (
                ticker.symbol.clone(),
                CryptoPrice {
                    price,
                    change_24h: round2(change),
                },
            )
        })
        .collect()
}

/// Round to two decimals, as displayed.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
