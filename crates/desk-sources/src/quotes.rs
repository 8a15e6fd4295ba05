//! Market quote batch adapter (Yahoo chart API).
//!
//! Quotes are fetched one symbol per request, issued in fixed-size groups
//! with a pause between groups to stay under the upstream rate limit. The
//! pacing is policy, not correctness: a group that partially fails still
//! contributes its successful symbols.

use std::collections::BTreeMap;
use std::time::Duration;

use futures_util::future::join_all;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use desk_core::Quote;

use crate::error::{SourceError, SourceResult};

fn default_chart_url() -> String {
    "https://query1.finance.yahoo.com/v8/finance/chart".to_string()
}

fn default_symbols() -> Vec<String> {
    [
        "VOO", "MGK", "VIG", "VOT", "VO", "VNQ", "PAVE", "SLV", "VBK", "VB", "VWO", "ARKK", "GDX",
        "GDXJ", "SILJ", "TLT", "ARKG", "IBB", "XLE",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_batch_size() -> usize {
    5
}

fn default_batch_pause_ms() -> u64 {
    200
}

fn default_timeout_secs() -> u64 {
    10
}

/// Quote adapter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotesConfig {
    #[serde(default = "default_chart_url")]
    pub chart_url: String,
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,
    /// Requests issued concurrently per group.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between groups.
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            chart_url: default_chart_url(),
            symbols: default_symbols(),
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

/// Client for the per-symbol chart endpoint.
pub struct QuoteClient {
    client: Client,
    config: QuotesConfig,
}

impl QuoteClient {
    pub fn new(config: QuotesConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SourceError::Http(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Fetch quotes for every configured symbol.
    ///
    /// Returns `None` when no symbol could be fetched (or none are
    /// configured), so the merge keeps the previous batch.
    pub async fn fetch_all(&self) -> Option<BTreeMap<String, Quote>> {
        if self.config.symbols.is_empty() {
            return None;
        }

        let batch_size = self.config.batch_size.max(1);
        let mut quotes = BTreeMap::new();
        let groups: Vec<&[String]> = self.config.symbols.chunks(batch_size).collect();
        let group_count = groups.len();

        for (i, group) in groups.into_iter().enumerate() {
            let fetches = group.iter().map(|symbol| self.fetch_one(symbol));
            for (symbol, result) in group.iter().zip(join_all(fetches).await) {
                match result {
                    Ok(quote) => {
                        quotes.insert(symbol.clone(), quote);
                    }
                    Err(e) => warn!(symbol = %symbol, error = %e, "Failed to fetch quote"),
                }
            }
            if i + 1 < group_count {
                tokio::time::sleep(Duration::from_millis(self.config.batch_pause_ms)).await;
            }
        }

        if quotes.is_empty() {
            warn!("No market quotes could be fetched this cycle");
            return None;
        }
        info!(
            quotes = quotes.len(),
            symbols = self.config.symbols.len(),
            "Fetched market quotes"
        );
        Some(quotes)
    }

    async fn fetch_one(&self, symbol: &str) -> SourceResult<Quote> {
        let url = format!(
            "{}/{}?interval=1d&range=1d",
            self.config.chart_url.trim_end_matches('/'),
            symbol
        );
        debug!(symbol, "Fetching quote");

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

        parse_chart(symbol, &body)
    }
}

/// Extract a quote from a chart response.
fn parse_chart(symbol: &str, body: &Value) -> SourceResult<Quote> {
    let result = body["chart"]["result"]
        .get(0)
        .ok_or_else(|| SourceError::Shape("chart.result is empty".to_string()))?;
    let meta = &result["meta"];

    let price = meta["regularMarketPrice"]
        .as_f64()
        .ok_or_else(|| SourceError::Shape("missing regularMarketPrice".to_string()))?;
    let prev_close = meta["previousClose"]
        .as_f64()
        .or_else(|| meta["chartPreviousClose"].as_f64())
        .ok_or_else(|| SourceError::Shape("missing previousClose".to_string()))?;

    let change = price - prev_close;
    let change_percent = if prev_close == 0.0 {
        0.0
    } else {
        change / prev_close * 100.0
    };

    // Last reported intraday volume, if the series carries one.
    let volume = result["indicators"]["quote"]
        .get(0)
        .and_then(|q| q["volume"].as_array())
        .and_then(|v| v.iter().rev().find_map(Value::as_f64));

    Ok(Quote {
        symbol: symbol.to_string(),
        price,
        change,
        change_percent,
        volume,
        high: meta["regularMarketDayHigh"].as_f64(),
        low: meta["regularMarketDayLow"].as_f64(),
        market_state: meta["marketState"].as_str().map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chart_body() -> Value {
        json!({
            "chart": {
                "result": [{
                    "meta": {
                        "regularMarketPrice": 110.0,
                        "previousClose": 100.0,
                        "regularMarketDayHigh": 111.0,
                        "regularMarketDayLow": 99.5,
                        "marketState": "REGULAR"
                    },
                    "indicators": {
                        "quote": [{"volume": [1000.0, 2000.0, null]}]
                    }
                }]
            }
        })
    }

    #[test]
    fn parses_chart_response() {
        let quote = parse_chart("VOO", &chart_body()).unwrap();
        assert_eq!(quote.symbol, "VOO");
        assert_eq!(quote.price, 110.0);
        assert_eq!(quote.change, 10.0);
        assert!((quote.change_percent - 10.0).abs() < 1e-9);
        // Trailing null is skipped; the last reported volume wins.
        assert_eq!(quote.volume, Some(2000.0));
        assert_eq!(quote.market_state.as_deref(), Some("REGULAR"));
    }

    #[test]
    fn falls_back_to_chart_previous_close() {
        let body = json!({
            "chart": {"result": [{
                "meta": {"regularMarketPrice": 50.0, "chartPreviousClose": 40.0}
            }]}
        });
        let quote = parse_chart("SLV", &body).unwrap();
        assert_eq!(quote.change, 10.0);
        assert!(quote.volume.is_none());
    }

    #[test]
    fn rejects_empty_chart() {
        let body = json!({"chart": {"result": []}});
        assert!(parse_chart("VOO", &body).is_err());
    }

    #[test]
    fn default_config_paces_in_groups_of_five() {
        let config = QuotesConfig::default();
        assert_eq!(config.batch_size, 5);
        assert_eq!(config.batch_pause_ms, 200);
        assert!(config.symbols.len() > config.batch_size);
    }
}
