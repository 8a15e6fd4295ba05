//! desk - trading desk dashboard state engine.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use desk_cli::{commands, logging, Cli, Command, DeskConfig};
use desk_store::StateStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging()?;

    let config = DeskConfig::load(cli.config.as_deref().map(Path::new))?;
    let store = StateStore::new(&config.state_path);

    match cli.command {
        Command::Sync => commands::sync(&store, &config).await,
        Command::Defi(args) => commands::defi(&store, args),
        Command::Momentum(args) => commands::momentum(&store, args),
        Command::Trading(args) => commands::trading(&store, args),
        Command::Daily(args) => commands::daily(&store, args),
    }
}
