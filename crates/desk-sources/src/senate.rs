//! Senator-trades scraper adapter.
//!
//! The scraper is an external process that prints a JSON array of recent
//! trades on stdout. Every failure mode (missing script, spawn failure,
//! timeout, non-zero exit, unparseable output) degrades to an empty list,
//! which the merge treats as "no new data" rather than "zero trades".

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::{SourceError, SourceResult};

fn default_command() -> String {
    "node".to_string()
}

fn default_args() -> Vec<String> {
    vec!["get-trades-data.js".to_string()]
}

fn default_workdir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join("clawd/senator-trades")
}

fn default_timeout_secs() -> u64 {
    60
}

/// Scraper invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default = "default_command")]
    pub command: String,
    #[serde(default = "default_args")]
    pub args: Vec<String>,
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
    /// Hard ceiling on the scrape; a hung process counts as failed.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
            workdir: default_workdir(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Run the scraper and collect its trades, empty on any failure.
pub async fn run_scraper(config: &ScraperConfig) -> Vec<Value> {
    match run_inner(config).await {
        Ok(trades) => {
            info!(trades = trades.len(), "Scraped senator trades");
            trades
        }
        Err(e) => {
            warn!(error = %e, "Failed to scrape senator trades");
            Vec::new()
        }
    }
}

async fn run_inner(config: &ScraperConfig) -> SourceResult<Vec<Value>> {
    if !config.workdir.exists() {
        return Err(SourceError::Process(format!(
            "scraper directory not found: {}",
            config.workdir.display()
        )));
    }

    let output = timeout(
        Duration::from_secs(config.timeout_secs),
        Command::new(&config.command)
            .args(&config.args)
            .current_dir(&config.workdir)
            .kill_on_drop(true)
            .output(),
    )
    .await
    .map_err(|_| SourceError::Timeout(config.timeout_secs))?
    .map_err(|e| SourceError::Process(format!("failed to spawn scraper: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SourceError::Process(format!(
            "scraper exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let trades: Vec<Value> = serde_json::from_slice(&output.stdout)?;
    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, command: &str, args: &[&str]) -> ScraperConfig {
        ScraperConfig {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            workdir: dir.path().to_path_buf(),
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn missing_workdir_yields_empty() {
        let config = ScraperConfig {
            workdir: PathBuf::from("/definitely/not/here"),
            ..ScraperConfig::default()
        };
        assert!(run_scraper(&config).await.is_empty());
    }

    #[tokio::test]
    async fn failing_process_yields_empty() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "false", &[]);
        assert!(run_scraper(&config).await.is_empty());
    }

    #[tokio::test]
    async fn unparseable_output_yields_empty() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "echo", &["not json"]);
        assert!(run_scraper(&config).await.is_empty());
    }

    #[tokio::test]
    async fn json_array_output_is_collected() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("scrape.sh");
        fs::write(
            &script,
            "#!/bin/sh\necho '[{\"senator\":\"A\",\"ticker\":\"VOO\"}]'\n",
        )
        .unwrap();
        let config = config_for(&dir, "sh", &["scrape.sh"]);

        let trades = run_scraper(&config).await;
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0]["ticker"], "VOO");
    }

    #[tokio::test]
    async fn hung_process_hits_the_ceiling() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir, "sleep", &["30"]);
        config.timeout_secs = 1;

        let start = std::time::Instant::now();
        let trades = run_scraper(&config).await;
        assert!(trades.is_empty());
        assert!(start.elapsed() < Duration::from_secs(5));
    }
}
