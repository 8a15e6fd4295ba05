//! Command-line entry points for the desk dashboard state engine.
//!
//! The binary wires configuration, logging, the store, and the
//! sync/mutation commands together; the heavy lifting lives in the
//! component crates.

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{Cli, Command};
pub use config::DeskConfig;
