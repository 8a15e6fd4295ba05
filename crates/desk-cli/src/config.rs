//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use desk_sources::{BotFilesConfig, CryptoConfig, QuotesConfig, ScraperConfig};

fn default_state_path() -> PathBuf {
    PathBuf::from("state.json")
}

/// Top-level configuration for every entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Location of the persisted dashboard document.
    pub state_path: PathBuf,
    /// Crypto price batch adapter.
    pub crypto: CryptoConfig,
    /// Market quote batch adapter.
    pub quotes: QuotesConfig,
    /// Native bot state files.
    pub bot_files: BotFilesConfig,
    /// Senator-trades scraper invocation.
    pub scraper: ScraperConfig,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            crypto: CryptoConfig::default(),
            quotes: QuotesConfig::default(),
            bot_files: BotFilesConfig::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl DeskConfig {
    /// Resolve configuration: explicit path > `DESK_CONFIG` env var >
    /// `config/default.toml` > built-in defaults.
    ///
    /// An explicitly requested file must exist; the fallback chain
    /// tolerates absence.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let fallback = std::env::var("DESK_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));

        if fallback.exists() {
            Self::from_file(&fallback)
        } else {
            warn!(path = %fallback.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }
}
