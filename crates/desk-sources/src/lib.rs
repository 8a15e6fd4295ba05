//! Source adapters for the desk dashboard.
//!
//! Each adapter fetches or reads one external signal and normalizes it
//! into the document's record shapes. Failures are isolated: an adapter
//! returns an explicit absence (or an empty list, for the scraper) and
//! logs the cause, never propagating an error past its boundary.

pub mod bots;
pub mod crypto;
pub mod error;
pub mod quotes;
pub mod senate;

pub use bots::{load_defi_snapshot, load_trading_snapshot, BotFilesConfig};
pub use crypto::{CryptoConfig, CryptoPriceClient, CryptoTicker};
pub use error::{SourceError, SourceResult};
pub use quotes::{QuoteClient, QuotesConfig};
pub use senate::{run_scraper, ScraperConfig};
